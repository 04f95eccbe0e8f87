//! Popup text and the pointer bindings that open and close it.
//!
//! The four bindings are independent: hover and click can both open, and
//! leaving or double-clicking can both close. This is not a toggle, so a
//! click followed by a pointer-leave closes the popup again.

/// Pointer interactions a marker listens to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PopupEvent {
    PointerEnter,
    PointerLeave,
    Click,
    DoubleClick,
}

impl PopupEvent {
    pub const ALL: [PopupEvent; 4] = [
        PopupEvent::PointerEnter,
        PopupEvent::PointerLeave,
        PopupEvent::Click,
        PopupEvent::DoubleClick,
    ];

    /// DOM-level event name used by the mapping library.
    pub fn event_name(self) -> &'static str {
        match self {
            PopupEvent::PointerEnter => "mouseover",
            PopupEvent::PointerLeave => "mouseout",
            PopupEvent::Click => "click",
            PopupEvent::DoubleClick => "dblclick",
        }
    }

    pub fn action(self) -> PopupAction {
        match self {
            PopupEvent::PointerEnter | PopupEvent::Click => PopupAction::Open,
            PopupEvent::PointerLeave | PopupEvent::DoubleClick => PopupAction::Close,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PopupAction {
    Open,
    Close,
}

/// Open/closed state of one popup after a sequence of events.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct PopupState {
    pub open: bool,
}

impl PopupState {
    pub fn apply(&mut self, event: PopupEvent) {
        self.open = matches!(event.action(), PopupAction::Open);
    }
}

/// `Magnitude: {mag}<br>Location: {place}`. The place is escaped since it
/// is inserted as HTML.
pub fn popup_html(magnitude: Option<f64>, place: Option<&str>) -> String {
    let mag = magnitude
        .map(|m| m.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let place = place.map(escape_html).unwrap_or_else(|| "unknown".to_string());
    format!("Magnitude: {mag}<br>Location: {place}")
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_magnitude_and_place() {
        assert_eq!(
            popup_html(Some(2.0), Some("5 km SW of Volcano, Hawaii")),
            "Magnitude: 2<br>Location: 5 km SW of Volcano, Hawaii"
        );
        assert_eq!(
            popup_html(Some(4.35), Some("Fiji region")),
            "Magnitude: 4.35<br>Location: Fiji region"
        );
    }

    #[test]
    fn missing_values_render_unknown() {
        assert_eq!(
            popup_html(None, None),
            "Magnitude: unknown<br>Location: unknown"
        );
    }

    #[test]
    fn place_is_escaped() {
        assert_eq!(
            popup_html(Some(1.0), Some("<b>A & B</b>")),
            "Magnitude: 1<br>Location: &lt;b&gt;A &amp; B&lt;/b&gt;"
        );
    }

    #[test]
    fn bindings_are_independent_not_a_toggle() {
        let mut state = PopupState::default();
        state.apply(PopupEvent::Click);
        assert!(state.open);
        // A second click keeps it open rather than toggling.
        state.apply(PopupEvent::Click);
        assert!(state.open);
        state.apply(PopupEvent::PointerLeave);
        assert!(!state.open);
        state.apply(PopupEvent::PointerEnter);
        assert!(state.open);
        state.apply(PopupEvent::DoubleClick);
        assert!(!state.open);
    }

    #[test]
    fn every_event_has_a_distinct_dom_name() {
        let mut names: Vec<_> = PopupEvent::ALL.iter().map(|e| e.event_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 4);
    }
}
