//! Namespace object rendering.
//!
//! Rendering is split in two: [`NamespaceLayout::plan`] decides, per export,
//! whether the property is a live getter or a copied value and whether its
//! key needs quoting; the [`std::fmt::Display`] impl then prints that record.
//! The printed shape is part of the linker's output contract:
//!
//! ```text
//! var ns = /*#__PURE__*/Object.freeze({
//! 	get counter () { return counter; },
//! 	helper: helper
//! });
//! ```

use crate::err::LinkError;
use crate::graph::LinkGraph;
use crate::ident::is_identifier_name;
use crate::ident::is_reserved_word;
use crate::ident::quote_string;
use crate::ids::BindingId;
use serde::Deserialize;
use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKeyword {
  #[default]
  Var,
  Const,
}

impl DeclarationKeyword {
  pub fn as_str(self) -> &'static str {
    match self {
      DeclarationKeyword::Var => "var",
      DeclarationKeyword::Const => "const",
    }
  }
}

/// Options controlling how namespace objects are printed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderOptions {
  /// Prefix for nested lines.
  pub indent: String,
  /// Expose live bindings through getters where a copied value could go
  /// stale. Ignored in legacy mode.
  pub getters: bool,
  /// Target ES3-era engines: quote reserved-word keys and tolerate a missing
  /// `Object.freeze`.
  pub legacy: bool,
  /// Freeze the namespace object.
  pub freeze: bool,
  /// Tag the object with `Symbol.toStringTag` = `'Module'`.
  pub namespace_to_string_tag: bool,
  /// Notify the System loader when the namespace is itself exported.
  pub system_bindings: bool,
  pub declaration_keyword: DeclarationKeyword,
}

impl Default for RenderOptions {
  fn default() -> Self {
    Self {
      indent: "\t".to_string(),
      getters: true,
      legacy: false,
      freeze: true,
      namespace_to_string_tag: false,
      system_bindings: false,
      declaration_keyword: DeclarationKeyword::Var,
    }
  }
}

impl RenderOptions {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
    self.indent = indent.into();
    self
  }

  pub fn with_getters(mut self, getters: bool) -> Self {
    self.getters = getters;
    self
  }

  pub fn with_legacy(mut self, legacy: bool) -> Self {
    self.legacy = legacy;
    self
  }

  pub fn with_freeze(mut self, freeze: bool) -> Self {
    self.freeze = freeze;
    self
  }

  pub fn with_namespace_to_string_tag(mut self, tag: bool) -> Self {
    self.namespace_to_string_tag = tag;
    self
  }

  pub fn with_system_bindings(mut self, system_bindings: bool) -> Self {
    self.system_bindings = system_bindings;
    self
  }

  pub fn with_declaration_keyword(mut self, keyword: DeclarationKeyword) -> Self {
    self.declaration_keyword = keyword;
    self
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyKey {
  Bare(String),
  Quoted(String),
}

impl fmt::Display for PropertyKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PropertyKey::Bare(name) => f.write_str(name),
      PropertyKey::Quoted(name) => f.write_str(&quote_string(name)),
    }
  }
}

/// How a property reads the binding it exposes (by its display name).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MemberValue {
  Getter(String),
  Value(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberLayout {
  pub key: PropertyKey,
  pub value: MemberValue,
}

impl MemberLayout {
  /// Decides the representation of one export. `live` is set when a copied
  /// value could be observed stale: the namespace is referenced early or the
  /// original is reassigned.
  pub fn choose(
    export_name: &str,
    original_name: &str,
    live: bool,
    options: &RenderOptions,
  ) -> Self {
    let quoted = !is_identifier_name(export_name)
      || (options.legacy && is_reserved_word(export_name));
    let key = if quoted {
      PropertyKey::Quoted(export_name.to_string())
    } else {
      PropertyKey::Bare(export_name.to_string())
    };
    let value = if live && options.getters && !options.legacy {
      MemberValue::Getter(original_name.to_string())
    } else {
      MemberValue::Value(original_name.to_string())
    };
    MemberLayout { key, value }
  }

  fn write(&self, f: &mut fmt::Formatter<'_>, indent: &str) -> fmt::Result {
    match &self.value {
      MemberValue::Getter(original) => {
        write!(f, "{indent}get {} () {{ return {original}; }}", self.key)
      }
      MemberValue::Value(original) => write!(f, "{indent}{}: {original}", self.key),
    }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FreezeCall {
  None,
  Freeze,
  /// `Object.freeze` may be missing in legacy engines.
  GuardedFreeze,
}

impl FreezeCall {
  pub fn callee(self) -> &'static str {
    match self {
      FreezeCall::None => "",
      FreezeCall::Freeze => "/*#__PURE__*/Object.freeze",
      FreezeCall::GuardedFreeze => "/*#__PURE__*/(Object.freeze || Object)",
    }
  }
}

/// Everything needed to print one namespace declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamespaceLayout {
  pub keyword: DeclarationKeyword,
  pub name: String,
  pub indent: String,
  pub members: Vec<MemberLayout>,
  pub freeze: FreezeCall,
  pub string_tag: bool,
  pub system_export: Option<String>,
}

impl NamespaceLayout {
  pub fn plan(
    graph: &LinkGraph,
    binding: BindingId,
    options: &RenderOptions,
  ) -> Result<Self, LinkError> {
    let _span = tracing::debug_span!("render_namespace", binding = binding.raw()).entered();
    let ns = graph.namespace(binding)?;
    let members = ns
      .originals()
      .map(|(export_name, original)| {
        let original = graph.binding(original);
        let live = ns.referenced_early() || original.is_reassigned();
        MemberLayout::choose(export_name, original.name(), live, options)
      })
      .collect();
    let freeze = match (options.freeze, options.legacy) {
      (false, _) => FreezeCall::None,
      (true, false) => FreezeCall::Freeze,
      (true, true) => FreezeCall::GuardedFreeze,
    };
    let system_export = if options.system_bindings {
      ns.export_name().map(str::to_string)
    } else {
      None
    };
    Ok(NamespaceLayout {
      keyword: options.declaration_keyword,
      name: graph.binding(binding).name().to_string(),
      indent: options.indent.clone(),
      members,
      freeze,
      string_tag: options.namespace_to_string_tag,
      system_export,
    })
  }

  fn write_members(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, member) in self.members.iter().enumerate() {
      if i > 0 {
        f.write_str(",\n")?;
      }
      member.write(f, &self.indent)?;
    }
    Ok(())
  }
}

impl fmt::Display for NamespaceLayout {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = &self.name;
    let indent = &self.indent;
    let callee = self.freeze.callee();
    write!(f, "{} {name} = ", self.keyword.as_str())?;
    if self.string_tag {
      // Freezing waits until the tag is defined.
      f.write_str("{\n")?;
      self.write_members(f)?;
      f.write_str("\n};")?;
      write!(
        f,
        "\nif (typeof Symbol !== 'undefined' && Symbol.toStringTag)\n\
         {indent}Object.defineProperty({name}, Symbol.toStringTag, {{ value: 'Module' }});\n\
         else\n\
         {indent}Object.defineProperty({name}, 'toString', {{ value: function () {{ return '[object Module]' }} }});"
      )?;
      if self.freeze != FreezeCall::None {
        write!(f, "\n{callee}({name});")?;
      }
    } else {
      write!(f, "{callee}({{\n")?;
      self.write_members(f)?;
      f.write_str("\n});")?;
    }
    if let Some(export_name) = &self.system_export {
      write!(f, "\nexports({}, {name});", quote_string(export_name))?;
    }
    Ok(())
  }
}
