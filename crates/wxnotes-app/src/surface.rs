//! Output side of the UI.
//!
//! Widget rendering is not this crate's concern; handlers only talk to the
//! window through this trait.

pub trait Surface {
    /// Blocking warning dialog.
    fn warn(&mut self, title: &str, message: &str);

    /// Replace the weather label.
    fn show_weather(&mut self, text: &str);

    /// Redraw the notes list.
    fn show_notes(&mut self, lines: &[String]);

    fn show_help(&mut self) {}
}
