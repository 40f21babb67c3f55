//! Ordered JSON emission for feedback entities.
//!
//! Field presence depends on which optional values are set, and the shape
//! of `arg` depends on whether any variables resolve for the entity, so
//! items and modifiers are written field by field instead of derived.

use serde::ser::{Error as _, SerializeMap};
use serde::{Serialize, Serializer};

use crate::icon::{Icon, IconKind};
use crate::item::Item;
use crate::modifier::Modifier;
use crate::variables::{VarScope, Variables};

/// An argument together with the variables it carries to the next
/// workflow step.
///
/// Serializes as `""` when empty, as the bare argument when there are no
/// variables, and as an `alfredworkflow` object otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgVars {
    arg: Option<String>,
    variables: Variables,
}

impl ArgVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_arg(&mut self, arg: impl Into<String>) -> &mut Self {
        self.arg = Some(arg.into());
        self
    }

    pub fn set_var(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.variables.set(key, value);
        self
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[derive(Serialize)]
struct Envelope<'a> {
    alfredworkflow: Payload<'a>,
}

#[derive(Serialize)]
struct Payload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    arg: Option<&'a str>,
    variables: &'a Variables,
}

impl Serialize for ArgVars {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.variables.is_empty() {
            return serializer.serialize_str(self.arg.as_deref().unwrap_or_default());
        }

        Envelope {
            alfredworkflow: Payload {
                arg: self.arg.as_deref(),
                variables: &self.variables,
            },
        }
        .serialize(serializer)
    }
}

/// Value of the `arg` field: the bare argument, or the argument and every
/// resolved variable stringified into a single JSON string.
fn encode_arg(arg: &str, scope: &VarScope<'_>) -> serde_json::Result<String> {
    let variables = scope.resolve();
    if variables.is_empty() {
        return Ok(arg.to_string());
    }

    ArgVars {
        arg: Some(arg.to_string()),
        variables,
    }
    .to_json()
}

impl Serialize for Icon {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("path", self.value())?;
        if self.kind() != IconKind::Plain {
            map.serialize_entry("type", self.kind().as_str())?;
        }
        map.end()
    }
}

#[derive(Serialize)]
struct Text<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    copy: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    largetype: Option<&'a str>,
}

/// An item paired with the variable scope it inherits.
pub(crate) struct ItemDocument<'a> {
    pub(crate) item: &'a Item,
    pub(crate) scope: VarScope<'a>,
}

impl Serialize for ItemDocument<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let item = self.item;
        if item.title().is_empty() {
            return Err(S::Error::custom("item title must not be empty"));
        }

        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("title", item.title())?;
        if let Some(subtitle) = item.subtitle() {
            map.serialize_entry("subtitle", subtitle)?;
        }
        if let Some(arg) = item.arg() {
            let encoded = encode_arg(arg, &self.scope).map_err(S::Error::custom)?;
            map.serialize_entry("arg", &encoded)?;
        }
        if let Some(autocomplete) = item.autocomplete() {
            map.serialize_entry("autocomplete", autocomplete)?;
        }
        map.serialize_entry("valid", &item.valid())?;
        if let Some(uid) = item.uid() {
            map.serialize_entry("uid", uid)?;
        }
        if item.is_file() {
            map.serialize_entry("type", "file")?;
        }
        if let Some(icon) = item.icon() {
            map.serialize_entry("icon", icon)?;
        }
        if item.copy_text().is_some() || item.large_type_text().is_some() {
            let text = Text {
                copy: item.copy_text(),
                largetype: item.large_type_text(),
            };
            map.serialize_entry("text", &text)?;
        }
        if !item.modifiers().is_empty() {
            let mods = Mods {
                item,
                scope: &self.scope,
            };
            map.serialize_entry("mods", &mods)?;
        }
        map.end()
    }
}

struct Mods<'a, 's> {
    item: &'a Item,
    scope: &'s VarScope<'a>,
}

impl Serialize for Mods<'_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.item.modifiers().len()))?;
        for (key, modifier) in self.item.modifiers() {
            let document = ModifierDocument {
                modifier,
                scope: self.scope.child(&modifier.variables),
            };
            map.serialize_entry(key.as_str(), &document)?;
        }
        map.end()
    }
}

pub(crate) struct ModifierDocument<'a> {
    pub(crate) modifier: &'a Modifier,
    pub(crate) scope: VarScope<'a>,
}

impl Serialize for ModifierDocument<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let modifier = self.modifier;
        let mut map = serializer.serialize_map(None)?;
        if let Some(arg) = modifier.arg() {
            let encoded = encode_arg(arg, &self.scope).map_err(S::Error::custom)?;
            map.serialize_entry("arg", &encoded)?;
        }
        if let Some(subtitle) = modifier.subtitle() {
            map.serialize_entry("subtitle", subtitle)?;
        }
        if let Some(valid) = modifier.valid() {
            map.serialize_entry("valid", &valid)?;
        }
        map.end()
    }
}

/// A detached item only sees its own variables.
impl Serialize for Item {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ItemDocument {
            item: self,
            scope: VarScope::root(&self.variables),
        }
        .serialize(serializer)
    }
}

impl Serialize for Modifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ModifierDocument {
            modifier: self,
            scope: VarScope::root(&self.variables),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::ModifierKey;

    fn item_json(item: &Item) -> String {
        serde_json::to_string(item).expect("serialize item")
    }

    fn modifier_json(modifier: &Modifier) -> String {
        serde_json::to_string(modifier).expect("serialize modifier")
    }

    #[test]
    fn minimal_item_always_carries_valid_false() {
        let item = Item::new("title");
        assert_eq!(item_json(&item), r#"{"title":"title","valid":false}"#);
    }

    #[test]
    fn set_but_empty_fields_serialize_as_empty_strings() {
        let mut item = Item::new("title");
        item.set_autocomplete("");
        assert_eq!(
            item_json(&item),
            r#"{"title":"title","autocomplete":"","valid":false}"#
        );

        let mut item = Item::new("title");
        item.set_arg("");
        assert_eq!(item_json(&item), r#"{"title":"title","arg":"","valid":false}"#);
    }

    #[test]
    fn item_fields_follow_emission_order() {
        let mut item = Item::new("title");
        item.set_uid("xxx-yyy");
        assert_eq!(
            item_json(&item),
            r#"{"title":"title","valid":false,"uid":"xxx-yyy"}"#
        );

        let mut item = Item::new("title");
        item.set_autocomplete("xxx-yyy");
        assert_eq!(
            item_json(&item),
            r#"{"title":"title","autocomplete":"xxx-yyy","valid":false}"#
        );

        let mut item = Item::new("title");
        item.set_subtitle("subtitle");
        assert_eq!(
            item_json(&item),
            r#"{"title":"title","subtitle":"subtitle","valid":false}"#
        );

        let mut item = Item::new("title");
        item.set_arg("arg1").set_valid(true);
        assert_eq!(
            item_json(&item),
            r#"{"title":"title","arg":"arg1","valid":true}"#
        );

        let mut item = Item::new("title");
        item.set_file(true);
        assert_eq!(
            item_json(&item),
            r#"{"title":"title","valid":false,"type":"file"}"#
        );
    }

    #[test]
    fn full_item_emits_every_field_in_order() {
        let mut item = Item::new("title");
        item.set_subtitle("sub")
            .set_arg("arg")
            .set_autocomplete("auto")
            .set_valid(true)
            .set_uid("uid")
            .set_file(true)
            .set_icon(Icon::new("icon.png"))
            .set_copy_text("copy")
            .set_large_type_text("large");
        item.modifier(ModifierKey::Alt).set_valid(false);

        assert_eq!(
            item_json(&item),
            concat!(
                r#"{"title":"title","subtitle":"sub","arg":"arg","autocomplete":"auto","#,
                r#""valid":true,"uid":"uid","type":"file","icon":{"path":"icon.png"},"#,
                r#""text":{"copy":"copy","largetype":"large"},"mods":{"alt":{"valid":false}}}"#
            )
        );
    }

    #[test]
    fn icon_type_is_emitted_only_for_non_plain_kinds() {
        let mut item = Item::new("title");
        item.set_icon(Icon::new("icon.png"));
        assert_eq!(
            item_json(&item),
            r#"{"title":"title","valid":false,"icon":{"path":"icon.png"}}"#
        );

        item.set_icon(Icon::new("icon.png").with_kind(IconKind::FileIcon));
        assert_eq!(
            item_json(&item),
            r#"{"title":"title","valid":false,"icon":{"path":"icon.png","type":"fileicon"}}"#
        );

        item.set_icon(Icon::new("public.folder").with_kind(IconKind::FileType));
        assert_eq!(
            item_json(&item),
            r#"{"title":"title","valid":false,"icon":{"path":"public.folder","type":"filetype"}}"#
        );
    }

    #[test]
    fn text_object_carries_only_set_keys() {
        let mut item = Item::new("title");
        item.set_copy_text("copy");
        assert_eq!(
            item_json(&item),
            r#"{"title":"title","valid":false,"text":{"copy":"copy"}}"#
        );

        let mut item = Item::new("title");
        item.set_large_type_text("large");
        assert_eq!(
            item_json(&item),
            r#"{"title":"title","valid":false,"text":{"largetype":"large"}}"#
        );

        item.set_copy_text("copy");
        assert_eq!(
            item_json(&item),
            r#"{"title":"title","valid":false,"text":{"copy":"copy","largetype":"large"}}"#
        );
    }

    #[test]
    fn alternate_subtitle_is_nested_under_mods() {
        let mut item = Item::new("title");
        item.set_subtitle("subtitle");
        item.modifier(ModifierKey::Cmd).set_subtitle("command sub");
        assert_eq!(
            item_json(&item),
            r#"{"title":"title","subtitle":"subtitle","valid":false,"mods":{"cmd":{"subtitle":"command sub"}}}"#
        );
    }

    #[test]
    fn arg_with_variables_is_wrapped_into_a_json_string() {
        let mut item = Item::new("title");
        item.set_arg("value");
        assert_eq!(
            item_json(&item),
            r#"{"title":"title","arg":"value","valid":false}"#
        );

        item.set_var("foo", "bar");
        let json = item_json(&item);
        assert_eq!(
            json,
            r#"{"title":"title","arg":"{\"alfredworkflow\":{\"arg\":\"value\",\"variables\":{\"foo\":\"bar\"}}}","valid":false}"#
        );

        let parsed: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        let arg = parsed["arg"].as_str().expect("arg is a string");
        let inner: serde_json::Value = serde_json::from_str(arg).expect("arg holds json");
        assert_eq!(
            inner,
            serde_json::json!({"alfredworkflow": {"arg": "value", "variables": {"foo": "bar"}}})
        );
    }

    #[test]
    fn variables_without_arg_do_not_emit_arg() {
        let mut item = Item::new("title");
        item.set_var("foo", "bar");
        assert_eq!(item_json(&item), r#"{"title":"title","valid":false}"#);
    }

    #[test]
    fn empty_title_is_rejected() {
        let item = Item::new("");
        let error = serde_json::to_string(&item).expect_err("empty title must fail");
        assert!(error.to_string().contains("empty"));
    }

    #[test]
    fn modifier_fields_are_all_optional() {
        let modifier = Modifier::new(ModifierKey::Cmd);
        assert_eq!(modifier_json(&modifier), "{}");

        let mut modifier = Modifier::new(ModifierKey::Cmd);
        modifier.set_arg("title");
        assert_eq!(modifier_json(&modifier), r#"{"arg":"title"}"#);

        let mut modifier = Modifier::new(ModifierKey::Cmd);
        modifier.set_arg("");
        assert_eq!(modifier_json(&modifier), r#"{"arg":""}"#);

        let mut modifier = Modifier::new(ModifierKey::Cmd);
        modifier.set_subtitle("sub here");
        assert_eq!(modifier_json(&modifier), r#"{"subtitle":"sub here"}"#);

        let mut modifier = Modifier::new(ModifierKey::Cmd);
        modifier.set_valid(true);
        assert_eq!(modifier_json(&modifier), r#"{"valid":true}"#);

        let mut modifier = Modifier::new(ModifierKey::Cmd);
        modifier
            .set_arg("title")
            .set_subtitle("sub here")
            .set_valid(true);
        assert_eq!(
            modifier_json(&modifier),
            r#"{"arg":"title","subtitle":"sub here","valid":true}"#
        );
    }

    #[test]
    fn modifier_valid_false_is_emitted_once_set() {
        let mut modifier = Modifier::new(ModifierKey::Ctrl);
        modifier.set_valid(false);
        assert_eq!(modifier_json(&modifier), r#"{"valid":false}"#);
    }

    #[test]
    fn arg_vars_shapes() {
        let empty = ArgVars::new();
        assert_eq!(empty.to_json().expect("encode"), r#""""#);

        let mut arg_only = ArgVars::new();
        arg_only.set_arg("title");
        assert_eq!(arg_only.to_json().expect("encode"), r#""title""#);

        let mut vars_only = ArgVars::new();
        vars_only.set_var("foo", "bar");
        assert_eq!(
            vars_only.to_json().expect("encode"),
            r#"{"alfredworkflow":{"variables":{"foo":"bar"}}}"#
        );

        let mut sorted = ArgVars::new();
        sorted.set_var("foo", "bar").set_var("ducky", "fuzz");
        assert_eq!(
            sorted.to_json().expect("encode"),
            r#"{"alfredworkflow":{"variables":{"ducky":"fuzz","foo":"bar"}}}"#
        );

        sorted.set_arg("title");
        assert_eq!(
            sorted.to_json().expect("encode"),
            r#"{"alfredworkflow":{"arg":"title","variables":{"ducky":"fuzz","foo":"bar"}}}"#
        );
    }
}
