//! UI helper functions

use ratatui::layout::Rect;

/// Word wrapping by character count
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.chars().count();
        if current_line.is_empty() {
            current_line = word.to_string();
            current_width = word_width;
        } else if current_width + 1 + word_width <= max_width {
            current_line.push(' ');
            current_line.push_str(word);
            current_width += 1 + word_width;
        } else {
            lines.push(std::mem::take(&mut current_line));
            current_line = word.to_string();
            current_width = word_width;
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

/// A `width` x `height` rect centered in `area`, shrunk to fit and shifted
/// horizontally by `offset_x` columns (kept inside `area`)
pub fn centered_rect(area: Rect, width: u16, height: u16, offset_x: i16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let slack = area.width - width;
    let x = (i32::from(slack / 2) + i32::from(offset_x)).clamp(0, i32::from(slack)) as u16;
    Rect {
        x: area.x + x,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text_empty() {
        let result = wrap_text("", 10);
        assert_eq!(result, vec![""]);
    }

    #[test]
    fn test_wrap_text_zero_width() {
        let result = wrap_text("hello world", 0);
        assert_eq!(result, vec!["hello world"]);
    }

    #[test]
    fn test_wrap_text_multiple_lines() {
        let result = wrap_text("hello world foo bar", 10);
        assert_eq!(result, vec!["hello", "world foo", "bar"]);
    }

    #[test]
    fn test_wrap_text_counts_chars_not_bytes() {
        let result = wrap_text("café café", 9);
        assert_eq!(result, vec!["café café"]);
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_rect(area, 60, 10, 0), Rect::new(20, 15, 60, 10));
    }

    #[test]
    fn test_centered_rect_shrinks_to_area() {
        let area = Rect::new(5, 5, 30, 8);
        assert_eq!(centered_rect(area, 60, 10, 0), Rect::new(5, 5, 30, 8));
    }

    #[test]
    fn test_centered_rect_offset_is_clamped() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_rect(area, 60, 10, 8).x, 28);
        assert_eq!(centered_rect(area, 60, 10, 100).x, 40);
        assert_eq!(centered_rect(area, 60, 10, -100).x, 0);
    }
}
