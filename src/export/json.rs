use super::ExportError;
use std::io::Write;

/// Write any serializable report as pretty JSON
pub fn write_json<T, W>(data: &T, writer: &mut W) -> Result<(), ExportError>
where
    T: serde::Serialize,
    W: Write + ?Sized,
{
    let json_data = serde_json::to_string_pretty(data)
        .map_err(|e| ExportError::SerializationError(e.to_string()))?;

    writer.write_all(json_data.as_bytes())?;
    writeln!(writer)?;

    Ok(())
}
