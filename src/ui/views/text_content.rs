use crate::app::{AppEvent, Effect};
use crate::floating::Content;
use crate::text;

/// Static text, used for notifications and simple popups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextContent {
    text: String,
}

impl TextContent {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Word-wrap the text to at most `cols` columns.
    pub fn wrapped(text: &str, cols: usize) -> Self {
        Self::new(text::wrap(text, cols))
    }
}

impl Content for TextContent {
    fn update(&mut self, _event: &AppEvent) -> Effect {
        Effect::None
    }

    fn view(&self) -> String {
        self.text.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_is_the_text() {
        let mut content = TextContent::new("hello");
        assert!(content.update(&AppEvent::Tick).is_none());
        assert_eq!(content.view(), "hello");
    }

    #[test]
    fn test_wrapped() {
        assert_eq!(TextContent::wrapped("a bb ccc", 4).view(), "a bb\nccc");
    }
}
