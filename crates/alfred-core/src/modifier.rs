use crate::icon::Icon;
use crate::variables::Variables;

/// Keyboard modifier that activates an alternate item behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ModifierKey {
    Cmd,
    Alt,
    Ctrl,
    Shift,
    Fn,
}

impl ModifierKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cmd => "cmd",
            Self::Alt => "alt",
            Self::Ctrl => "ctrl",
            Self::Shift => "shift",
            Self::Fn => "fn",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "cmd" | "command" => Some(Self::Cmd),
            "alt" | "option" | "opt" => Some(Self::Alt),
            "ctrl" | "control" => Some(Self::Ctrl),
            "shift" => Some(Self::Shift),
            "fn" => Some(Self::Fn),
            _ => None,
        }
    }
}

/// Alternate behavior of an item while `key` is held.
///
/// Unlike [`crate::Item`], `valid` is a true tri-state here: it is only
/// emitted once it has been set explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modifier {
    key: ModifierKey,
    subtitle: Option<String>,
    arg: Option<String>,
    valid: Option<bool>,
    icon: Option<Icon>,
    pub(crate) variables: Variables,
}

impl Modifier {
    pub fn new(key: ModifierKey) -> Self {
        Self {
            key,
            subtitle: None,
            arg: None,
            valid: None,
            icon: None,
            variables: Variables::new(),
        }
    }

    pub fn key(&self) -> ModifierKey {
        self.key
    }

    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    pub fn arg(&self) -> Option<&str> {
        self.arg.as_deref()
    }

    pub fn valid(&self) -> Option<bool> {
        self.valid
    }

    pub fn icon(&self) -> Option<&Icon> {
        self.icon.as_ref()
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn set_subtitle(&mut self, subtitle: impl Into<String>) -> &mut Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn set_arg(&mut self, arg: impl Into<String>) -> &mut Self {
        self.arg = Some(arg.into());
        self
    }

    pub fn set_valid(&mut self, valid: bool) -> &mut Self {
        self.valid = Some(valid);
        self
    }

    pub fn set_icon(&mut self, icon: Icon) -> &mut Self {
        self.icon = Some(icon);
        self
    }

    pub fn set_var(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.variables.set(key, value);
        self
    }
}
