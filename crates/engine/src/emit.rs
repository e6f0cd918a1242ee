// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use jr_adapters::OutputSink;
use serde::Serialize;
use serde_json::Value;

use crate::QueryError;

/// Hand a result structure to the output sink.
pub(crate) fn emit<S, T>(sink: &S, data: &T, format: Option<&str>) -> Result<(), QueryError>
where
    S: OutputSink + ?Sized,
    T: Serialize + ?Sized,
{
    let value = serde_json::to_value(data)?;
    sink.display(&value, format)?;
    Ok(())
}

/// Emit `{}` for queries that found nothing.
pub(crate) fn emit_empty<S: OutputSink + ?Sized>(sink: &S) -> Result<(), QueryError> {
    sink.display(&Value::Object(serde_json::Map::new()), None)?;
    Ok(())
}
