//! Writes uploaded files into the provisioned folders and records them.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, info, warn};

use trainhub_core::config::IngestConfig;
use trainhub_core::error::{AppError, ErrorKind};
use trainhub_core::result::AppResult;
use trainhub_core::traits::storage::StorageProvider;
use trainhub_database::StoreTransaction;
use trainhub_entity::{CreateFileRecord, FileLabel, FileRecord};

use super::naming;
use super::provisioner::{FolderHandle, ProjectFolders};
use super::request::{MISSING_FIELDS_MESSAGE, ModelUpload, TrainingEntry};
use super::response::{ModelFileInfo, UploadedFile};

/// A decoded file about to be stored.
struct NewFile {
    file_name: String,
    original_name: Option<String>,
    label: FileLabel,
    data: Vec<u8>,
}

/// Decodes, writes and records uploaded files.
///
/// Every path written is appended to the caller's `written` list so a
/// failed upload can remove them again.
#[derive(Debug, Clone)]
pub struct FileIngestor {
    /// Private file storage.
    storage: Arc<dyn StorageProvider>,
    /// Naming and fingerprint settings.
    config: IngestConfig,
    /// URL prefix for stored files.
    url_prefix: String,
}

impl FileIngestor {
    /// Creates a new file ingestor.
    pub fn new(
        storage: Arc<dyn StorageProvider>,
        config: IngestConfig,
        url_prefix: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            config,
            url_prefix: url_prefix.into(),
        }
    }

    /// Store one training image.
    ///
    /// `index` is the 0-based position of the entry in the request.
    /// Returns `None` when the label is neither `ok` nor `defective`.
    pub async fn ingest_image(
        &self,
        tx: &mut dyn StoreTransaction,
        project: &str,
        index: usize,
        entry: &TrainingEntry,
        folders: &ProjectFolders,
        written: &mut Vec<String>,
    ) -> AppResult<Option<UploadedFile>> {
        let (Some(image), Some(raw_label)) = (entry.image.as_deref(), entry.label.as_deref())
        else {
            return Err(AppError::validation(MISSING_FIELDS_MESSAGE));
        };

        let Some(label) = FileLabel::from_image_label(raw_label) else {
            debug!(index, label = raw_label, "Skipping entry with unknown label");
            return Ok(None);
        };

        let data = naming::decode_payload(image).map_err(|e| {
            AppError::with_source(
                ErrorKind::Validation,
                format!("Error saving image file: {e}"),
                e,
            )
        })?;

        let suffix = naming::random_token(self.config.image_suffix_len);
        let file = NewFile {
            file_name: naming::image_file_name(project, label.as_str(), index + 1, &suffix),
            original_name: None,
            label,
            data,
        };

        let record = self
            .store_file(tx, project, folders.for_label(label), file, written)
            .await
            .map_err(|e| e.context("Error saving image file"))?;

        Ok(Some(UploadedFile {
            name: record.file_name,
            url: record.file_url,
            label,
            docname: record.id,
        }))
    }

    /// Store the model artifact.
    ///
    /// Returns `None` unless both the payload and the name are non-empty.
    /// The stored name always ends in `.h5`.
    pub async fn ingest_model(
        &self,
        tx: &mut dyn StoreTransaction,
        project: &str,
        model: &ModelUpload,
        folders: &ProjectFolders,
        written: &mut Vec<String>,
    ) -> AppResult<Option<(ModelFileInfo, UploadedFile)>> {
        let (Some(payload), Some(original_name)) =
            (model.file_data.as_deref(), model.file_name.as_deref())
        else {
            return Ok(None);
        };
        if payload.is_empty() || original_name.is_empty() {
            return Ok(None);
        }

        if !naming::has_model_extension(original_name) {
            warn!(
                original_name,
                "Model file extension is not {}, storing as {}",
                naming::MODEL_EXTENSION,
                naming::MODEL_EXTENSION
            );
        }

        let data = naming::decode_payload(payload).map_err(|e| {
            AppError::with_source(
                ErrorKind::Validation,
                format!("Error saving model file: {e}"),
                e,
            )
        })?;

        let suffix = naming::random_token(self.config.model_suffix_len);
        let file = NewFile {
            file_name: naming::model_file_name(project, &suffix),
            original_name: Some(original_name.to_string()),
            label: FileLabel::Model,
            data,
        };

        let record = self
            .store_file(tx, project, &folders.model, file, written)
            .await
            .map_err(|e| e.context("Error saving model file"))?;

        let info = ModelFileInfo {
            name: record.file_name.clone(),
            original_name: original_name.to_string(),
            url: record.file_url.clone(),
            docname: record.id,
        };
        let uploaded = UploadedFile {
            name: record.file_name,
            url: record.file_url,
            label: FileLabel::Model,
            docname: record.id,
        };
        Ok(Some((info, uploaded)))
    }

    /// Delete files written by a failed upload. Failures are logged and
    /// otherwise ignored.
    pub async fn remove_written(&self, written: &[String]) {
        for path in written {
            if let Err(e) = self.storage.delete(path).await {
                warn!(path = %path, error = %e, "Failed to remove file after aborted upload");
            }
        }
        if !written.is_empty() {
            info!(files = written.len(), "Removed files of aborted upload");
        }
    }

    async fn store_file(
        &self,
        tx: &mut dyn StoreTransaction,
        project: &str,
        folder: &FolderHandle,
        file: NewFile,
        written: &mut Vec<String>,
    ) -> AppResult<FileRecord> {
        let path = format!("{}/{}", folder.path, file.file_name);
        self.storage.write(&path, Bytes::from(file.data)).await?;
        written.push(path.clone());

        let size = self.storage.size(&path).await?;
        let file_size = i64::try_from(size)
            .map_err(|_| AppError::storage(format!("File too large to record: {path}")))?;

        let record = tx
            .insert_file(&CreateFileRecord {
                file_name: file.file_name,
                original_name: file.original_name,
                label: file.label,
                folder_id: folder.node.id,
                project: project.to_string(),
                file_size,
                content_hash: naming::random_token(self.config.fingerprint_len),
                file_url: format!("{}/{}", self.url_prefix.trim_end_matches('/'), path),
                is_private: true,
            })
            .await?;

        debug!(
            file_id = %record.id,
            path = %path,
            size = file_size,
            label = %record.label,
            "Stored file"
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trainhub_database::DocumentStore;
    use trainhub_database::memory::MemoryDocumentStore;
    use trainhub_storage::LocalStorageProvider;

    use crate::training::provisioner::FolderProvisioner;

    struct Fixture {
        dir: tempfile::TempDir,
        store: MemoryDocumentStore,
        folders: ProjectFolders,
        ingestor: FileIngestor,
    }

    async fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let storage: Arc<dyn StorageProvider> = Arc::new(
            LocalStorageProvider::new(dir.path().to_str().unwrap())
                .await
                .unwrap(),
        );
        let store = MemoryDocumentStore::new();
        let folders = FolderProvisioner::new(Arc::new(store.clone()), Arc::clone(&storage))
            .provision("P1")
            .await
            .unwrap();
        let ingestor = FileIngestor::new(storage, IngestConfig::default(), "/private/files");
        Fixture {
            dir,
            store,
            folders,
            ingestor,
        }
    }

    #[tokio::test]
    async fn test_ingest_image() {
        let f = fixture().await;
        let mut tx = f.store.begin().await.unwrap();
        let mut written = Vec::new();

        let entry = TrainingEntry::new("data:image/png;base64,aGVsbG8=", "OK");
        let uploaded = f
            .ingestor
            .ingest_image(&mut *tx, "P1", 2, &entry, &f.folders, &mut written)
            .await
            .unwrap()
            .unwrap();
        tx.commit().await.unwrap();

        assert!(uploaded.name.starts_with("P1ok3_"));
        assert!(uploaded.name.ends_with(".png"));
        assert_eq!(uploaded.name.len(), "P1ok3_".len() + 6 + ".png".len());
        assert_eq!(
            uploaded.url,
            format!("/private/files/Home/training_data/P1/ok/{}", uploaded.name)
        );
        assert_eq!(written.len(), 1);

        let on_disk = std::fs::read(
            f.dir
                .path()
                .join("Home/training_data/P1/ok")
                .join(&uploaded.name),
        )
        .unwrap();
        assert_eq!(on_disk, b"hello");

        let records = f.store.list_files("P1").await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, uploaded.docname);
        assert_eq!(records[0].file_size, 5);
        assert_eq!(records[0].content_hash.len(), 10);
        assert_eq!(records[0].folder_id, f.folders.ok.node.id);
    }

    #[tokio::test]
    async fn test_unknown_label_skipped() {
        let f = fixture().await;
        let mut tx = f.store.begin().await.unwrap();
        let mut written = Vec::new();

        let entry = TrainingEntry::new("aGVsbG8=", "bad");
        let result = f
            .ingestor
            .ingest_image(&mut *tx, "P1", 0, &entry, &f.folders, &mut written)
            .await
            .unwrap();
        assert!(result.is_none());
        assert!(written.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_base64_fails() {
        let f = fixture().await;
        let mut tx = f.store.begin().await.unwrap();
        let mut written = Vec::new();

        let entry = TrainingEntry::new("%%%not-base64%%%", "defective");
        let err = f
            .ingestor
            .ingest_image(&mut *tx, "P1", 0, &entry, &f.folders, &mut written)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.starts_with("Error saving image file"));
        assert!(written.is_empty());
    }

    #[tokio::test]
    async fn test_ingest_model_coerces_extension() {
        let f = fixture().await;
        let mut tx = f.store.begin().await.unwrap();
        let mut written = Vec::new();

        let model = ModelUpload::new("d2VpZ2h0cw==", "weights.txt");
        let (info, uploaded) = f
            .ingestor
            .ingest_model(&mut *tx, "P1", &model, &f.folders, &mut written)
            .await
            .unwrap()
            .unwrap();
        tx.commit().await.unwrap();

        assert!(info.name.starts_with("P1model"));
        assert!(info.name.ends_with(".h5"));
        assert_eq!(info.name.len(), "P1model".len() + 8 + ".h5".len());
        assert_eq!(info.original_name, "weights.txt");
        assert_eq!(uploaded.label, FileLabel::Model);
        assert_eq!(uploaded.docname, info.docname);

        let records = f.store.list_files("P1").await.unwrap();
        assert_eq!(records[0].original_name.as_deref(), Some("weights.txt"));
        assert_eq!(records[0].folder_id, f.folders.model.node.id);
    }

    #[tokio::test]
    async fn test_model_without_name_ignored() {
        let f = fixture().await;
        let mut tx = f.store.begin().await.unwrap();
        let mut written = Vec::new();

        let model = ModelUpload {
            file_data: Some("d2VpZ2h0cw==".to_string()),
            file_name: None,
        };
        let result = f
            .ingestor
            .ingest_model(&mut *tx, "P1", &model, &f.folders, &mut written)
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_remove_written() {
        let f = fixture().await;
        let mut tx = f.store.begin().await.unwrap();
        let mut written = Vec::new();

        let entry = TrainingEntry::new("aGVsbG8=", "ok");
        let uploaded = f
            .ingestor
            .ingest_image(&mut *tx, "P1", 0, &entry, &f.folders, &mut written)
            .await
            .unwrap()
            .unwrap();
        tx.rollback().await.unwrap();

        f.ingestor.remove_written(&written).await;
        let path = f
            .dir
            .path()
            .join("Home/training_data/P1/ok")
            .join(uploaded.name);
        assert!(!path.exists());
    }
}
