use crate::domain::model::Group;
use crate::domain::ports::Storage;
use crate::utils::error::{Result, TeamError};
use chrono::NaiveDate;

/// Spreadsheet apps (Excel in particular) need the BOM to detect UTF-8,
/// otherwise non-ASCII names come out garbled.
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// CSV 內容：表頭 GroupName,Name，每位成員一列
pub fn csv_bytes(groups: &[Group]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["GroupName", "Name"])?;
    for group in groups {
        for member in &group.members {
            writer.write_record([group.name.as_str(), member.name.as_str()])?;
        }
    }

    let body = writer
        .into_inner()
        .map_err(|e| TeamError::ProcessingError {
            message: format!("CSV buffer error: {}", e),
        })?;

    let mut output = Vec::with_capacity(UTF8_BOM.len() + body.len());
    output.extend_from_slice(UTF8_BOM);
    output.extend_from_slice(&body);
    Ok(output)
}

pub fn export_filename(date: NaiveDate) -> String {
    format!("groups_{}.csv", date.format("%Y-%m-%d"))
}

/// Write the current groups as a date-stamped CSV through the storage
/// port. Returns the filename used.
pub async fn export_groups<S: Storage>(storage: &S, groups: &[Group]) -> Result<String> {
    let filename = export_filename(chrono::Local::now().date_naive());
    let data = csv_bytes(groups)?;
    storage.write_file(&filename, &data).await?;

    tracing::info!("📁 Exported {} group(s) to {}", groups.len(), filename);
    Ok(filename)
}
