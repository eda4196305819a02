//! Port traits implemented by the infrastructure layer.

/// Read-only view of a set of environment variables.
///
/// Implementations must be side-effect free: looking a key up twice returns
/// the same answer for the lifetime of the source.
pub trait EnvSource {
    /// Value of `name`, or `None` if the variable is not defined.
    ///
    /// A variable defined as the empty string is present and returns
    /// `Some(String::new())`.
    fn var(&self, name: &str) -> Option<String>;

    /// Whether `name` is defined at all.
    fn contains(&self, name: &str) -> bool {
        self.var(name).is_some()
    }
}

impl<T: EnvSource + ?Sized> EnvSource for &T {
    fn var(&self, name: &str) -> Option<String> {
        (**self).var(name)
    }
}

impl<T: EnvSource + ?Sized> EnvSource for Box<T> {
    fn var(&self, name: &str) -> Option<String> {
        (**self).var(name)
    }
}
