/// Transient presentation state of an element: horizontal translation and
/// alpha. Layout is unaffected by either value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Presentation {
    pub translation_x: f32,
    pub alpha: f32,
}

impl Presentation {
    /// Untranslated and fully opaque.
    pub const REST: Presentation = Presentation {
        translation_x: 0.0,
        alpha: 1.0,
    };

    pub const fn new(translation_x: f32, alpha: f32) -> Self {
        Self {
            translation_x,
            alpha,
        }
    }
}

impl Default for Presentation {
    fn default() -> Self {
        Self::REST
    }
}
