/// The style environment a resolver probes.
pub trait StyleSurface {
    type Probe: ProbeElement;

    /// Whether the style object knows `camel_key`, e.g. `WebkitTransform`.
    fn recognizes(&self, camel_key: &str) -> bool;

    /// A fresh, detached element whose style nobody else touches.
    fn create_probe(&self) -> Self::Probe;
}

/// Inline style of a detached element.
///
/// Assignments never fail: a rejected value leaves the previous one in place,
/// and an accepted one may be normalized before it is stored.
pub trait ProbeElement {
    fn assign(&mut self, property: &str, value: &str);

    /// The stored value, or `""` when nothing was accepted.
    fn read(&self, property: &str) -> String;
}

impl<S> StyleSurface for &S
where
    S: StyleSurface + ?Sized,
{
    type Probe = S::Probe;

    fn recognizes(&self, camel_key: &str) -> bool {
        (**self).recognizes(camel_key)
    }

    fn create_probe(&self) -> Self::Probe {
        (**self).create_probe()
    }
}
