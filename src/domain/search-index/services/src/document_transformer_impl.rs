// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::BTreeSet;

use chrono::SecondsFormat;
use cms_search::*;
use serde_json::Value;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[dill::component(pub)]
#[dill::interface(dyn DocumentTransformer)]
#[dill::scope(dill::Singleton)]
pub struct DocumentTransformerImpl {}

impl DocumentTransformer for DocumentTransformerImpl {
    #[tracing::instrument(
        level = "debug",
        name = "DocumentTransformerImpl::transform",
        skip_all,
        fields(index_name = %definition.name, record_id = %record.id)
    )]
    fn transform(
        &self,
        definition: &IndexDefinition,
        record: &ContentRecord,
    ) -> Result<SearchDocument, DocumentTransformError> {
        let mut document = SearchDocument::new();
        let mut generic_fields: BTreeSet<&str> =
            definition.field_mapping.keys().map(String::as_str).collect();

        // Explicit transformers go first and see the partial document
        for (field, transformer) in &definition.field_transformers {
            if !generic_fields.remove(field.as_str()) {
                continue;
            }
            let raw = record.attribute(field);
            let value = transformer.transform(field, raw.as_ref(), record, &document)?;
            document.insert(field.clone(), value);
        }

        for field in generic_fields {
            let value = match record.attribute(field) {
                Some(raw) => coerce_value(field, &raw)?,
                None => Value::Null,
            };
            document.insert(field.to_string(), value);
        }

        Ok(document)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Generic conversion of a raw content value into its document form
pub fn coerce_value(field: &str, raw: &ContentValue) -> Result<Value, DocumentTransformError> {
    let value = match raw {
        ContentValue::Null | ContentValue::Bool(false) => Value::Null,
        ContentValue::Bool(true) => Value::Bool(true),
        ContentValue::Int(i) => Value::from(*i),
        ContentValue::Float(f) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        ContentValue::DateTime(dt) => Value::String(dt.to_rfc3339_opts(SecondsFormat::Secs, false)),
        ContentValue::RichText { html } => non_empty_string(strip_html(html)),
        ContentValue::Category { slug, level } => serde_json::json!({
            "slug": slug,
            "level": level,
        }),
        ContentValue::ElementCollection(_) => {
            return Err(DocumentTransformError::ElementCollectionNeedsTransformer {
                field: field.to_string(),
            });
        }
        ContentValue::Handle(handle) => Value::String(handle.clone()),
        ContentValue::List(items) => Value::Array(
            items
                .iter()
                .map(|item| coerce_value(field, item))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        ContentValue::Map(entries) => Value::Object(
            entries
                .iter()
                .map(|(k, v)| Ok((k.clone(), coerce_value(field, v)?)))
                .collect::<Result<serde_json::Map<_, _>, DocumentTransformError>>()?,
        ),
        ContentValue::String(s) => coerce_string(s),
    };

    Ok(value)
}

fn coerce_string(s: &str) -> Value {
    if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(n) = s.parse::<i64>() {
            return Value::from(n);
        }
    }

    non_empty_string(s.trim().to_string())
}

fn non_empty_string(s: String) -> Value {
    if s.is_empty() {
        Value::Null
    } else {
        Value::String(s)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Plain-text content of an HTML fragment
pub fn strip_html(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                text.push(' ');
            }
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }

    decode_entities(&text)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Decodes common named entities plus decimal and hex character references.
/// Anything unrecognized is kept verbatim.
fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        rest = &rest[start..];

        let decoded = rest
            .find(';')
            .filter(|end| *end <= 10)
            .and_then(|end| decode_entity(&rest[1..end]).map(|c| (c, end)));

        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &rest[end + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    let code = match name {
        "nbsp" => return Some(' '),
        "lt" => return Some('<'),
        "gt" => return Some('>'),
        "quot" => return Some('"'),
        "apos" => return Some('\''),
        "amp" => return Some('&'),
        _ => {
            let num = name.strip_prefix('#')?;
            match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse::<u32>().ok()?,
            }
        }
    };

    char::from_u32(code)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
