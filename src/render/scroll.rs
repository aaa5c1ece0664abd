// [business] DOM id of the "back to top" control on listing pages
pub const SCROLL_BUTTON_ID: &str = "scroll-button";

// [business] Visibility of the scroll-to-top button
// Every scroll event decides on its own: hidden at offset 0, shown anywhere else
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Shown,
}

impl Visibility {
    // Pages load at the top, before any scroll event fires
    pub const INITIAL: Visibility = Visibility::Hidden;

    pub fn for_offset(vertical_offset: f64) -> Self {
        if vertical_offset == 0.0 {
            Visibility::Hidden
        } else {
            Visibility::Shown
        }
    }

    // [business] Attribute text written on the button element
    pub fn hidden_attribute(self) -> &'static str {
        match self {
            Visibility::Hidden => " hidden",
            Visibility::Shown => "",
        }
    }
}

// [business] Client hook registered on the window's scroll event; mirrors Visibility::for_offset
pub fn scroll_observer_script() -> String {
    format!(
        "window.addEventListener('scroll', function () {{ \
var button = document.getElementById('{id}'); \
if (!button) {{ return; }} \
button.hidden = window.scrollY === 0; \
}});",
        id = SCROLL_BUTTON_ID
    )
}
