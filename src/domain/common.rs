/// Entities addressed by an opaque string id.
pub trait Identifiable {
    fn id(&self) -> &str;
}

/// Anything carrying a monetary amount that can be summed.
pub trait Amounted {
    fn amount(&self) -> f64;
}

/// One-line label used in logs and `Display` output.
pub trait Displayable {
    fn display_label(&self) -> String;
}
