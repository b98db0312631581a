/// Formats a number the way script engines print it: shortest round-trip
/// digits, `-0` kept, exponent form outside `[1e-6, 1e21)`.
pub(super) fn format(n: f64) -> String {
	if n.is_nan() {
		return "NaN".to_string();
	}
	if n.is_infinite() {
		return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
	}
	if n == 0.0 {
		return if n.is_sign_negative() { "-0" } else { "0" }.to_string();
	}
	if (1e-6..1e21).contains(&n.abs()) {
		return format!("{n}");
	}
	let sci = format!("{n:e}");
	match sci.split_once('e') {
		Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
		_ => sci,
	}
}
