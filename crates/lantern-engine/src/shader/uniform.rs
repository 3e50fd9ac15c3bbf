use std::fmt;
use std::rc::Rc;

/// Longest accepted uniform name, in bytes.
pub const MAX_UNIFORM_NAME_LEN: usize = 255;

/// Uniform payload, one variant per native "set uniform" call.
///
/// Array variants own their copy of the data and `Sampler` owns a strong
/// reference to its texture, so a queued value stays valid however long it
/// waits in a cache. Dropping the value releases both.
pub enum UniformValue<T> {
    Bool(bool),
    Int(i32),
    IntArray(Vec<i32>),
    IntVec4([i32; 4]),
    Float(f32),
    FloatArray(Vec<f32>),
    FloatVec4([f32; 4]),
    /// Column-major 4x4 matrix.
    Matrix([f32; 16]),
    Sampler { texture: Rc<T>, unit: u32 },
}

/// Variant tag of a [`UniformValue`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum UniformKind {
    Bool,
    Int,
    IntArray,
    IntVec4,
    Float,
    FloatArray,
    FloatVec4,
    Matrix,
    Sampler,
}

impl<T> UniformValue<T> {
    pub fn kind(&self) -> UniformKind {
        match self {
            UniformValue::Bool(_) => UniformKind::Bool,
            UniformValue::Int(_) => UniformKind::Int,
            UniformValue::IntArray(_) => UniformKind::IntArray,
            UniformValue::IntVec4(_) => UniformKind::IntVec4,
            UniformValue::Float(_) => UniformKind::Float,
            UniformValue::FloatArray(_) => UniformKind::FloatArray,
            UniformValue::FloatVec4(_) => UniformKind::FloatVec4,
            UniformValue::Matrix(_) => UniformKind::Matrix,
            UniformValue::Sampler { .. } => UniformKind::Sampler,
        }
    }
}

// Manual impl: the texture handle need not be `Debug`.
impl<T> fmt::Debug for UniformValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniformValue::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            UniformValue::Int(v) => f.debug_tuple("Int").field(v).finish(),
            UniformValue::IntArray(v) => f.debug_tuple("IntArray").field(v).finish(),
            UniformValue::IntVec4(v) => f.debug_tuple("IntVec4").field(v).finish(),
            UniformValue::Float(v) => f.debug_tuple("Float").field(v).finish(),
            UniformValue::FloatArray(v) => f.debug_tuple("FloatArray").field(v).finish(),
            UniformValue::FloatVec4(v) => f.debug_tuple("FloatVec4").field(v).finish(),
            UniformValue::Matrix(v) => f.debug_tuple("Matrix").field(v).finish(),
            UniformValue::Sampler { unit, .. } => {
                f.debug_struct("Sampler").field("unit", unit).finish_non_exhaustive()
            }
        }
    }
}

pub(crate) struct UniformEntry<T> {
    pub(crate) name: String,
    pub(crate) value: UniformValue<T>,
}

/// Pending uniform writes for one program, in insertion order.
///
/// Invariant: names are unique.
pub(crate) struct UniformCache<T> {
    entries: Vec<UniformEntry<T>>,
}

impl<T> UniformCache<T> {
    pub(crate) fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Queues `value` under `name`, evicting (and releasing) an older entry with
    /// the same name first. The new entry always goes to the back.
    pub(crate) fn put(&mut self, name: &str, value: UniformValue<T>) {
        if let Some(pos) = self.entries.iter().position(|e| e.name == name) {
            let old = self.entries.remove(pos);
            log::trace!("uniform `{}` overwritten in cache ({:?})", old.name, old.value.kind());
        }
        self.entries.push(UniformEntry { name: name.to_owned(), value });
    }

    /// Removes and returns every entry in insertion order.
    pub(crate) fn take(&mut self) -> Vec<UniformEntry<T>> {
        std::mem::take(&mut self.entries)
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    #[cfg(test)]
    pub(crate) fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Tex;

    #[test]
    fn put_appends_in_order() {
        let mut cache = UniformCache::<Tex>::new();
        cache.put("a", UniformValue::Int(1));
        cache.put("b", UniformValue::Int(2));
        assert_eq!(cache.names(), ["a", "b"]);
    }

    #[test]
    fn overwrite_moves_name_to_back() {
        let mut cache = UniformCache::<Tex>::new();
        cache.put("a", UniformValue::Int(1));
        cache.put("b", UniformValue::Int(2));
        cache.put("a", UniformValue::Int(3));
        assert_eq!(cache.names(), ["b", "a"]);
        assert_eq!(cache.len(), 2);

        let entries = cache.take();
        assert!(matches!(entries[1].value, UniformValue::Int(3)));
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn overwrite_releases_old_sampler() {
        let tex = Rc::new(Tex);
        let mut cache = UniformCache::new();
        cache.put("s", UniformValue::Sampler { texture: Rc::clone(&tex), unit: 0 });
        assert_eq!(Rc::strong_count(&tex), 2);
        cache.put("s", UniformValue::Int(0));
        assert_eq!(Rc::strong_count(&tex), 1);
    }

    #[test]
    fn names_are_case_sensitive() {
        let mut cache = UniformCache::<Tex>::new();
        cache.put("Color", UniformValue::Int(1));
        cache.put("color", UniformValue::Int(2));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn kind_tags() {
        assert_eq!(UniformValue::<Tex>::FloatArray(vec![1.0]).kind(), UniformKind::FloatArray);
        let s = UniformValue::Sampler { texture: Rc::new(Tex), unit: 3 };
        assert_eq!(s.kind(), UniformKind::Sampler);
        assert_eq!(format!("{s:?}"), "Sampler { unit: 3, .. }");
    }
}
