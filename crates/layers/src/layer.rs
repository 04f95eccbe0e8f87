#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u64);

pub trait Layer {
    fn id(&self) -> LayerId;

    /// Label shown in the layer control.
    fn name(&self) -> &str;
}
