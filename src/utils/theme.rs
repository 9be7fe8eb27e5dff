use colored::Colorize;

pub struct Theme {
    pub prompt_style: Box<dyn Fn(&str) -> String>,
    pub trace_style: Box<dyn Fn(&str) -> String>,
}

impl Theme {
    /// Styles for a terminal session.
    pub fn colored() -> Self {
        Theme {
            prompt_style: Box::new(|s: &str| s.bright_cyan().to_string()),
            trace_style: Box::new(|s: &str| s.dimmed().to_string()),
        }
    }

    /// No escape sequences, for pipes and files.
    pub fn plain() -> Self {
        Theme {
            prompt_style: Box::new(|s: &str| s.to_string()),
            trace_style: Box::new(|s: &str| s.to_string()),
        }
    }

    pub fn load_theme(interactive: bool) -> Self {
        if interactive {
            Theme::colored()
        } else {
            Theme::plain()
        }
    }
}
