use crate::text;

const FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

/// Busy indicator advanced on every tick
#[derive(Debug, Clone, Default)]
pub struct Spinner {
    frame: usize,
}

impl Spinner {
    pub fn tick(&mut self) {
        self.frame = (self.frame + 1) % FRAMES.len();
    }

    pub fn view(&self) -> &'static str {
        FRAMES[self.frame]
    }
}

/// What a list view is waiting for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activity {
    #[default]
    Idle,
    Scanning,
    Connecting,
    Disconnecting,
}

impl Activity {
    fn label(self) -> &'static str {
        match self {
            Activity::Idle => "",
            Activity::Scanning => "Scanning",
            Activity::Connecting => "Connecting",
            Activity::Disconnecting => "Disconnecting",
        }
    }
}

/// One-line activity indicator shown under a table
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    activity: Activity,
    spinner: Spinner,
}

impl StatusLine {
    pub fn set(&mut self, activity: Activity) {
        self.activity = activity;
    }

    pub fn activity(&self) -> Activity {
        self.activity
    }

    pub fn is_idle(&self) -> bool {
        self.activity == Activity::Idle
    }

    pub fn tick(&mut self) {
        if !self.is_idle() {
            self.spinner.tick();
        }
    }

    /// The indicator centered in `width` columns.
    pub fn view(&self, width: usize) -> String {
        let symbol = match self.activity {
            Activity::Idle => "✓".to_string(),
            busy => format!("{} {}", busy.label(), self.spinner.view()),
        };
        let left = width.saturating_sub(text::width(&symbol)) / 2;
        let line = format!("{}{symbol}", " ".repeat(left));
        text::pad_right(&text::truncate_right(&line, width), width)
    }
}
