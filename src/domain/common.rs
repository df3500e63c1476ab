/// Identifier of a recorded transaction: milliseconds since the Unix epoch at
/// creation time, bumped forward when needed to stay strictly increasing.
pub type TransactionId = i64;

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}
