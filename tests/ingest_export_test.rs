use anyhow::Result;
use team_tools::core::export;
use team_tools::{Grouping, LocalStorage, Roster, Storage};
use tempfile::TempDir;

#[tokio::test]
async fn test_roster_file_roundtrip_through_storage() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = LocalStorage::new(temp_dir.path().to_string_lossy().into_owned());

    storage
        .write_file("names.txt", "王小明, 李大同; 張三\n趙四".as_bytes())
        .await?;

    let text = storage.read_text("names.txt").await?;
    let roster = Roster::from_text(&text);

    let names: Vec<_> = roster.participants().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["王小明", "李大同", "張三", "趙四"]);
    Ok(())
}

#[tokio::test]
async fn test_export_writes_bom_prefixed_csv() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = LocalStorage::new(temp_dir.path().to_string_lossy().into_owned());

    let roster = Roster::from_text("甲\n乙\n丙\n丁\n戊");
    let mut grouping = Grouping::with_seed(4);
    grouping.partition(roster.participants(), 2);

    let filename = export::export_groups(&storage, grouping.groups()).await?;
    assert!(filename.starts_with("groups_"));
    assert!(filename.ends_with(".csv"));

    let bytes = storage.read_file(&filename).await?;
    assert_eq!(&bytes[..3], &[0xEF, 0xBB, 0xBF]);

    let text = String::from_utf8(bytes[3..].to_vec())?;
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("GroupName,Name"));

    // One row per (group, member) pair, all five members present.
    let rows: Vec<&str> = lines.collect();
    assert_eq!(rows.len(), 5);
    for member in ["甲", "乙", "丙", "丁", "戊"] {
        assert_eq!(rows.iter().filter(|row| row.ends_with(member)).count(), 1);
    }
    Ok(())
}

#[tokio::test]
async fn test_export_of_empty_partition_is_header_only() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = LocalStorage::new(temp_dir.path().to_string_lossy().into_owned());

    let mut grouping = Grouping::with_seed(1);
    grouping.partition(&[], 4);

    let filename = export::export_groups(&storage, grouping.groups()).await?;
    let bytes = storage.read_file(&filename).await?;
    let text = String::from_utf8(bytes[3..].to_vec())?;
    assert_eq!(text.trim_end(), "GroupName,Name");
    Ok(())
}
