/// How Alfred should resolve an icon value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconKind {
    /// Image file at the given path.
    #[default]
    Plain,
    /// Icon of the file at the given path.
    FileIcon,
    /// Icon of a filetype, given as a UTI such as `public.folder`.
    FileType,
}

impl IconKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "",
            Self::FileIcon => "fileicon",
            Self::FileType => "filetype",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "plain" | "path" => Some(Self::Plain),
            "fileicon" => Some(Self::FileIcon),
            "filetype" => Some(Self::FileType),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    value: String,
    kind: IconKind,
}

impl Icon {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: IconKind::Plain,
        }
    }

    pub fn with_kind(mut self, kind: IconKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn kind(&self) -> IconKind {
        self.kind
    }
}
