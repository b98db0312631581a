use std::sync::Arc;

/// Element kind of a fixed-width numeric array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypedKind {
	Int8,
	Uint8,
	Uint8Clamped,
	Int16,
	Uint16,
	Int32,
	Uint32,
	Float32,
	Float64,
}

impl TypedKind {
	pub const ALL: [TypedKind; 9] = [
		Self::Int8,
		Self::Uint8,
		Self::Uint8Clamped,
		Self::Int16,
		Self::Uint16,
		Self::Int32,
		Self::Uint32,
		Self::Float32,
		Self::Float64,
	];

	/// Type tag used when rendering, e.g. `Int8Array`.
	pub fn tag(self) -> &'static str {
		match self {
			Self::Int8 => "Int8Array",
			Self::Uint8 => "Uint8Array",
			Self::Uint8Clamped => "Uint8ClampedArray",
			Self::Int16 => "Int16Array",
			Self::Uint16 => "Uint16Array",
			Self::Int32 => "Int32Array",
			Self::Uint32 => "Uint32Array",
			Self::Float32 => "Float32Array",
			Self::Float64 => "Float64Array",
		}
	}

	/// Converts a number the way a store into this element kind does.
	fn coerce(self, n: f64) -> f64 {
		let int = if n.is_finite() { n.trunc() as i64 } else { 0 };
		match self {
			Self::Float64 => n,
			Self::Float32 => n as f32 as f64,
			Self::Uint8Clamped if n.is_nan() => 0.0,
			Self::Uint8Clamped => n.clamp(0.0, 255.0).round_ties_even(),
			Self::Int8 => f64::from(int as i8),
			Self::Uint8 => f64::from(int as u8),
			Self::Int16 => f64::from(int as i16),
			Self::Uint16 => f64::from(int as u16),
			Self::Int32 => f64::from(int as i32),
			Self::Uint32 => f64::from(int as u32),
		}
	}
}

/// A fixed-width numeric array. Elements are stored already coerced to the
/// element kind.
#[derive(Clone, Debug, PartialEq)]
pub struct TypedArray {
	kind: TypedKind,
	elements: Arc<[f64]>,
}

impl TypedArray {
	pub fn new<I>(kind: TypedKind, elements: I) -> Self
	where
		I: IntoIterator<Item = f64>,
	{
		Self {
			kind,
			elements: elements.into_iter().map(|n| kind.coerce(n)).collect(),
		}
	}

	pub fn kind(&self) -> TypedKind {
		self.kind
	}

	pub fn elements(&self) -> &[f64] {
		&self.elements
	}

	pub fn len(&self) -> usize {
		self.elements.len()
	}

	pub fn is_empty(&self) -> bool {
		self.elements.is_empty()
	}
}
