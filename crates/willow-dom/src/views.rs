//! Re-derived views over element attributes: class tokens, inline style
//! declarations, and `data-*` entries.
//!
//! None of these views cache anything. Every call re-reads the backing
//! attribute and every mutation writes it straight back, so the attribute
//! string is always the single source of truth.

use crate::error::TreeError;
use crate::tree::{Dom, NodeId};

// ===== class view =====

impl Dom {
    /// [§ 7.1 `DOMTokenList`](https://dom.spec.whatwg.org/#interface-domtokenlist)
    ///
    /// The class tokens of an element, split on ASCII whitespace, in order.
    #[must_use]
    pub fn class_list(&self, id: NodeId) -> Vec<String> {
        self.get_attribute(id, "class")
            .map(|v| v.split_ascii_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// The raw `class` attribute value, or the empty string when absent.
    #[must_use]
    pub fn class_name(&self, id: NodeId) -> String {
        self.get_attribute(id, "class").unwrap_or("").to_string()
    }

    /// Overwrite the `class` attribute wholesale.
    ///
    /// # Errors
    ///
    /// [`TreeError::Kind`] for non-element nodes, [`TreeError::InvalidId`]
    /// for unknown ids.
    pub fn set_class_name(&mut self, id: NodeId, value: &str) -> Result<(), TreeError> {
        self.set_attribute(id, "class", value)
    }

    /// Whether the element's class list contains `token`.
    #[must_use]
    pub fn class_contains(&self, id: NodeId, token: &str) -> bool {
        self.get_attribute(id, "class")
            .is_some_and(|v| v.split_ascii_whitespace().any(|t| t == token))
    }

    /// [§ 7.1 `DOMTokenList`](https://dom.spec.whatwg.org/#dom-domtokenlist-add)
    ///
    /// Add a class token unless already present.
    ///
    /// # Errors
    ///
    /// [`TreeError::Kind`] for non-element nodes, [`TreeError::InvalidId`]
    /// for unknown ids.
    pub fn class_add(&mut self, id: NodeId, token: &str) -> Result<(), TreeError> {
        if self.as_element(id).is_none() {
            // Route through set_attribute for the uniform error.
            return self.set_attribute(id, "class", token);
        }
        if self.class_contains(id, token) {
            return Ok(());
        }
        let mut tokens = self.class_list(id);
        tokens.push(token.to_string());
        self.set_attribute(id, "class", &tokens.join(" "))
    }

    /// [§ 7.1 `DOMTokenList`](https://dom.spec.whatwg.org/#dom-domtokenlist-remove)
    ///
    /// Remove a class token. Removing an absent token is a no-op.
    ///
    /// # Errors
    ///
    /// [`TreeError::Kind`] for non-element nodes, [`TreeError::InvalidId`]
    /// for unknown ids.
    pub fn class_remove(&mut self, id: NodeId, token: &str) -> Result<(), TreeError> {
        if self.as_element(id).is_none() {
            return self.set_attribute(id, "class", "");
        }
        // Write back only when the token was actually present, so a no-op
        // removal never materializes an empty `class` attribute.
        if !self.class_contains(id, token) {
            return Ok(());
        }
        let tokens: Vec<String> = self
            .class_list(id)
            .into_iter()
            .filter(|t| t != token)
            .collect();
        self.set_attribute(id, "class", &tokens.join(" "))
    }

    /// [§ 7.1 `DOMTokenList`](https://dom.spec.whatwg.org/#dom-domtokenlist-toggle)
    ///
    /// Toggle a class token; with `force`, add or remove unconditionally.
    /// Returns whether the token is present afterwards.
    ///
    /// # Errors
    ///
    /// [`TreeError::Kind`] for non-element nodes, [`TreeError::InvalidId`]
    /// for unknown ids.
    pub fn class_toggle(
        &mut self,
        id: NodeId,
        token: &str,
        force: Option<bool>,
    ) -> Result<bool, TreeError> {
        if self.as_element(id).is_none() {
            self.set_attribute(id, "class", "")?;
        }
        let present = self.class_contains(id, token);
        let wanted = force.unwrap_or(!present);
        if wanted && !present {
            self.class_add(id, token)?;
        } else if !wanted && present {
            self.class_remove(id, token)?;
        }
        Ok(wanted)
    }

    /// [§ 7.1 `DOMTokenList`](https://dom.spec.whatwg.org/#dom-domtokenlist-replace)
    ///
    /// Replace `old` with `new` in the class list, preserving its position.
    /// Returns whether a replacement happened.
    ///
    /// # Errors
    ///
    /// [`TreeError::Kind`] for non-element nodes, [`TreeError::InvalidId`]
    /// for unknown ids.
    pub fn class_replace(
        &mut self,
        id: NodeId,
        old: &str,
        new: &str,
    ) -> Result<bool, TreeError> {
        if self.as_element(id).is_none() {
            return self.set_attribute(id, "class", "").map(|()| false);
        }
        let mut replaced = false;
        let tokens: Vec<String> = self
            .class_list(id)
            .into_iter()
            .map(|t| {
                if t == old {
                    replaced = true;
                    new.to_string()
                } else {
                    t
                }
            })
            .collect();
        if replaced {
            self.set_attribute(id, "class", &tokens.join(" "))?;
        }
        Ok(replaced)
    }
}

// ===== style view =====

/// Lower a `camelCase` property name to its kebab-case CSS form
/// (`backgroundColor` to `background-color`). Names already in kebab-case
/// pass through unchanged.
#[must_use]
pub fn css_property_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Parse a `style` attribute value into `(property, value)` declarations,
/// splitting on `;` and the first `:` of each declaration. Malformed entries
/// without a colon are dropped.
#[must_use]
pub fn parse_style(text: &str) -> Vec<(String, String)> {
    text.split(';')
        .filter_map(|decl| {
            let (name, value) = decl.split_once(':')?;
            let name = name.trim();
            let value = value.trim();
            if name.is_empty() || value.is_empty() {
                return None;
            }
            Some((name.to_string(), value.to_string()))
        })
        .collect()
}

fn write_style(declarations: &[(String, String)]) -> String {
    declarations
        .iter()
        .map(|(name, value)| format!("{name}: {value}"))
        .collect::<Vec<_>>()
        .join("; ")
}

impl Dom {
    /// [§ CSSOM `cssText`](https://drafts.csswg.org/cssom/#dom-cssstyledeclaration-csstext)
    ///
    /// The raw `style` attribute value, or the empty string when absent.
    #[must_use]
    pub fn css_text(&self, id: NodeId) -> String {
        self.get_attribute(id, "style").unwrap_or("").to_string()
    }

    /// Overwrite the `style` attribute wholesale.
    ///
    /// # Errors
    ///
    /// [`TreeError::Kind`] for non-element nodes, [`TreeError::InvalidId`]
    /// for unknown ids.
    pub fn set_css_text(&mut self, id: NodeId, value: &str) -> Result<(), TreeError> {
        self.set_attribute(id, "style", value)
    }

    /// Look up an inline style property. The name may be `camelCase` or
    /// kebab-case.
    #[must_use]
    pub fn style_property(&self, id: NodeId, name: &str) -> Option<String> {
        let wanted = css_property_name(name);
        let style = self.get_attribute(id, "style")?;
        parse_style(style)
            .into_iter()
            .find(|(prop, _)| *prop == wanted)
            .map(|(_, value)| value)
    }

    /// Set an inline style property, replacing an existing declaration in
    /// place. A blank value removes the declaration instead.
    ///
    /// # Errors
    ///
    /// [`TreeError::Kind`] for non-element nodes, [`TreeError::InvalidId`]
    /// for unknown ids.
    pub fn set_style_property(
        &mut self,
        id: NodeId,
        name: &str,
        value: &str,
    ) -> Result<(), TreeError> {
        let wanted = css_property_name(name);
        let value = value.trim();
        if value.is_empty() {
            return self.remove_style_property(id, name);
        }
        if self.as_element(id).is_none() {
            return self.set_attribute(id, "style", "");
        }
        let mut declarations = parse_style(&self.css_text(id));
        if let Some(entry) = declarations.iter_mut().find(|(prop, _)| *prop == wanted) {
            entry.1 = value.to_string();
        } else {
            declarations.push((wanted, value.to_string()));
        }
        self.set_attribute(id, "style", &write_style(&declarations))
    }

    /// Remove an inline style property. Removing an absent declaration is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// [`TreeError::Kind`] for non-element nodes, [`TreeError::InvalidId`]
    /// for unknown ids.
    pub fn remove_style_property(&mut self, id: NodeId, name: &str) -> Result<(), TreeError> {
        let wanted = css_property_name(name);
        if self.as_element(id).is_none() {
            return self.set_attribute(id, "style", "");
        }
        // Write back only when a declaration was actually dropped, so a no-op
        // removal never materializes an empty `style` attribute.
        let mut declarations = match self.get_attribute(id, "style") {
            Some(style) => parse_style(style),
            None => return Ok(()),
        };
        let before = declarations.len();
        declarations.retain(|(prop, _)| *prop != wanted);
        if declarations.len() == before {
            return Ok(());
        }
        self.set_attribute(id, "style", &write_style(&declarations))
    }
}

// ===== dataset view =====

/// Map a `camelCase` dataset key to its `data-*` attribute name
/// (`userId` to `data-user-id`).
#[must_use]
pub fn dataset_attribute_name(key: &str) -> String {
    format!("data-{}", css_property_name(key))
}

impl Dom {
    /// [§ 3.2.6.6 Embedding custom non-visible data](https://html.spec.whatwg.org/multipage/dom.html#embedding-custom-non-visible-data-with-the-data-*-attributes)
    ///
    /// Look up a `data-*` attribute by its `camelCase` dataset key.
    #[must_use]
    pub fn data_get(&self, id: NodeId, key: &str) -> Option<&str> {
        let name = dataset_attribute_name(key);
        self.as_element(id)?.attributes.get(&name)
    }

    /// Set a `data-*` attribute by its `camelCase` dataset key.
    ///
    /// # Errors
    ///
    /// [`TreeError::Kind`] for non-element nodes, [`TreeError::InvalidId`]
    /// for unknown ids.
    pub fn data_set(&mut self, id: NodeId, key: &str, value: &str) -> Result<(), TreeError> {
        self.set_attribute(id, &dataset_attribute_name(key), value)
    }

    /// Remove a `data-*` attribute by its `camelCase` dataset key.
    ///
    /// # Errors
    ///
    /// [`TreeError::Kind`] for non-element nodes, [`TreeError::InvalidId`]
    /// for unknown ids.
    pub fn data_remove(&mut self, id: NodeId, key: &str) -> Result<(), TreeError> {
        self.remove_attribute(id, &dataset_attribute_name(key))
    }
}
