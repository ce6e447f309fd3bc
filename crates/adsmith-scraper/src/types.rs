/// Structured product facts extracted from a page.
///
/// `name` and `description` may each be empty when the page carries no usable
/// metadata for that field; absence is a checked state, not an error. Image
/// URLs are absolute and in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFacts {
    pub name: String,
    pub description: String,
    pub images: Vec<String>,
}

impl ProductFacts {
    /// True when neither a name nor a description was extracted, which the
    /// pipeline treats as a terminal acquisition failure.
    #[must_use]
    pub fn lacks_product_details(&self) -> bool {
        self.name.is_empty() && self.description.is_empty()
    }
}
