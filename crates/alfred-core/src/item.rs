use std::collections::BTreeMap;
use std::path::Path;

use crate::icon::{Icon, IconKind};
use crate::modifier::{Modifier, ModifierKey};
use crate::variables::Variables;

/// One selectable result row.
///
/// Optional text fields distinguish "unset" (`None`, omitted from the
/// output) from "set to empty" (`Some("")`, emitted as `""`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    title: String,
    subtitle: Option<String>,
    uid: Option<String>,
    arg: Option<String>,
    autocomplete: Option<String>,
    valid: bool,
    is_file: bool,
    icon: Option<Icon>,
    copy_text: Option<String>,
    large_type_text: Option<String>,
    modifiers: BTreeMap<ModifierKey, Modifier>,
    pub(crate) variables: Variables,
}

impl Item {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            uid: None,
            arg: None,
            autocomplete: None,
            valid: false,
            is_file: false,
            icon: None,
            copy_text: None,
            large_type_text: None,
            modifiers: BTreeMap::new(),
            variables: Variables::new(),
        }
    }

    /// Item describing a file on disk: titled by its file name, shown with
    /// a `~`-abbreviated path and the file's own icon.
    pub fn for_file(path: &Path, home: Option<&Path>) -> Self {
        let full_path = path.to_string_lossy().into_owned();
        let title = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| full_path.clone());

        let mut item = Self::new(title);
        item.set_subtitle(abbreviate_home(path, home))
            .set_uid(full_path.clone())
            .set_arg(full_path.clone())
            .set_valid(true)
            .set_file(true)
            .set_icon(Icon::new(full_path).with_kind(IconKind::FileIcon));
        item
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    pub fn uid(&self) -> Option<&str> {
        self.uid.as_deref()
    }

    pub fn arg(&self) -> Option<&str> {
        self.arg.as_deref()
    }

    pub fn autocomplete(&self) -> Option<&str> {
        self.autocomplete.as_deref()
    }

    pub fn valid(&self) -> bool {
        self.valid
    }

    pub fn is_file(&self) -> bool {
        self.is_file
    }

    pub fn icon(&self) -> Option<&Icon> {
        self.icon.as_ref()
    }

    pub fn copy_text(&self) -> Option<&str> {
        self.copy_text.as_deref()
    }

    pub fn large_type_text(&self) -> Option<&str> {
        self.large_type_text.as_deref()
    }

    pub fn modifiers(&self) -> &BTreeMap<ModifierKey, Modifier> {
        &self.modifiers
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn set_subtitle(&mut self, subtitle: impl Into<String>) -> &mut Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn set_uid(&mut self, uid: impl Into<String>) -> &mut Self {
        self.uid = Some(uid.into());
        self
    }

    pub fn set_arg(&mut self, arg: impl Into<String>) -> &mut Self {
        self.arg = Some(arg.into());
        self
    }

    pub fn set_autocomplete(&mut self, autocomplete: impl Into<String>) -> &mut Self {
        self.autocomplete = Some(autocomplete.into());
        self
    }

    pub fn set_valid(&mut self, valid: bool) -> &mut Self {
        self.valid = valid;
        self
    }

    pub fn set_file(&mut self, is_file: bool) -> &mut Self {
        self.is_file = is_file;
        self
    }

    pub fn set_icon(&mut self, icon: Icon) -> &mut Self {
        self.icon = Some(icon);
        self
    }

    pub fn set_copy_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.copy_text = Some(text.into());
        self
    }

    pub fn set_large_type_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.large_type_text = Some(text.into());
        self
    }

    pub fn set_var(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.variables.set(key, value);
        self
    }

    /// Returns the modifier registered for `key`, creating it on first use.
    pub fn modifier(&mut self, key: ModifierKey) -> &mut Modifier {
        self.modifiers
            .entry(key)
            .or_insert_with(|| Modifier::new(key))
    }

    // Split borrow so a modifier handle can see the item's own variables.
    pub(crate) fn modifier_with_variables(
        &mut self,
        key: ModifierKey,
    ) -> (&mut Modifier, &Variables) {
        let modifier = self
            .modifiers
            .entry(key)
            .or_insert_with(|| Modifier::new(key));
        (modifier, &self.variables)
    }
}

/// Replaces a leading `home` directory in `path` with `~`.
pub fn abbreviate_home(path: &Path, home: Option<&Path>) -> String {
    let Some(home) = home.filter(|home| !home.as_os_str().is_empty()) else {
        return path.to_string_lossy().into_owned();
    };

    match path.strip_prefix(home) {
        Ok(rest) if rest.as_os_str().is_empty() => "~".to_string(),
        Ok(rest) => format!("~/{}", rest.to_string_lossy()),
        Err(_) => path.to_string_lossy().into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn modifier_get_or_create_is_idempotent() {
        let mut item = Item::new("title");
        item.modifier(ModifierKey::Cmd).set_subtitle("first");
        item.modifier(ModifierKey::Cmd).set_arg("second");

        assert_eq!(item.modifiers().len(), 1);
        let modifier = &item.modifiers()[&ModifierKey::Cmd];
        assert_eq!(modifier.subtitle(), Some("first"));
        assert_eq!(modifier.arg(), Some("second"));
    }

    #[test]
    fn icon_reassignment_keeps_last_value() {
        let mut item = Item::new("title");
        item.set_icon(Icon::new("first").with_kind(IconKind::FileIcon));
        item.set_icon(Icon::new("second"));

        let icon = item.icon().expect("icon set");
        assert_eq!(icon.value(), "second");
        assert_eq!(icon.kind(), IconKind::Plain);
    }

    #[test]
    fn file_item_uses_file_name_and_abbreviated_path() {
        let path = PathBuf::from("/Users/tester/workflow/info.plist");
        let item = Item::for_file(&path, Some(Path::new("/Users/tester")));

        assert_eq!(item.title(), "info.plist");
        assert_eq!(item.subtitle(), Some("~/workflow/info.plist"));
        assert_eq!(item.uid(), Some("/Users/tester/workflow/info.plist"));
        assert_eq!(item.arg(), Some("/Users/tester/workflow/info.plist"));
        assert!(item.valid());
        assert!(item.is_file());

        let icon = item.icon().expect("file icon set");
        assert_eq!(icon.kind(), IconKind::FileIcon);
        assert_eq!(icon.value(), "/Users/tester/workflow/info.plist");
    }

    #[test]
    fn abbreviate_home_leaves_foreign_paths_untouched() {
        let home = Path::new("/Users/tester");
        assert_eq!(abbreviate_home(Path::new("/Users/tester"), Some(home)), "~");
        assert_eq!(
            abbreviate_home(Path::new("/Users/testers/file"), Some(home)),
            "/Users/testers/file"
        );
        assert_eq!(abbreviate_home(Path::new("/tmp/a"), None), "/tmp/a");
        assert_eq!(
            abbreviate_home(Path::new("/tmp/a"), Some(Path::new(""))),
            "/tmp/a"
        );
    }
}
