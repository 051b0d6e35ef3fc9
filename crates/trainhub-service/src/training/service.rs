//! The training-data upload workflow.
//!
//! `validate request → check project → provision folders → ingest images
//! → ingest model → commit`. Any failure after the transaction opens
//! rolls it back; files already written are removed when
//! `ingest.cleanup_on_failure` is set.

use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info, warn};

use trainhub_core::config::IngestConfig;
use trainhub_core::error::AppError;
use trainhub_core::result::AppResult;
use trainhub_core::traits::storage::StorageProvider;
use trainhub_database::{DocumentStore, StoreTransaction};
use trainhub_entity::validate_project_name;

use super::ingestor::FileIngestor;
use super::provisioner::{FolderProvisioner, ProjectFolders};
use super::request::TrainingUpload;
use super::response::{ModelFileInfo, UploadSummary, UploadedFile};

/// Prefix of every upload failure message.
pub const FAILURE_CONTEXT: &str = "Failed to upload training data or model";

const REFRESH_HINT: &str = "Please refresh the file manager to see all files.";

/// Runs uploads against a document store and private file storage.
#[derive(Debug, Clone)]
pub struct TrainingDataService {
    /// Document store.
    store: Arc<dyn DocumentStore>,
    /// Folder provisioner.
    provisioner: FolderProvisioner,
    /// File ingestor.
    ingestor: FileIngestor,
    /// Ingest settings.
    config: IngestConfig,
}

/// Files stored so far by one upload.
#[derive(Debug, Default)]
struct IngestOutcome {
    files: Vec<UploadedFile>,
    model_file: Option<ModelFileInfo>,
}

impl TrainingDataService {
    /// Creates a new training data service.
    pub fn new(
        store: Arc<dyn DocumentStore>,
        storage: Arc<dyn StorageProvider>,
        config: IngestConfig,
        url_prefix: impl Into<String>,
    ) -> Self {
        Self {
            provisioner: FolderProvisioner::new(Arc::clone(&store), Arc::clone(&storage)),
            ingestor: FileIngestor::new(storage, config.clone(), url_prefix),
            store,
            config,
        }
    }

    /// Upload a batch of labelled images and an optional model.
    ///
    /// Either every file record is committed or none is.
    pub async fn upload(&self, request: &TrainingUpload) -> AppResult<UploadSummary> {
        let started = Instant::now();
        match self.run(request).await {
            Ok(summary) => {
                info!(
                    project = %summary.project,
                    files = summary.count,
                    model = summary.model_file.is_some(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Training data uploaded"
                );
                Ok(summary)
            }
            Err(e) => {
                error!(
                    project = %request.project_name,
                    kind = %e.kind,
                    error = %e,
                    source = ?e.source,
                    "Error uploading training data or model"
                );
                Err(e.context(FAILURE_CONTEXT))
            }
        }
    }

    async fn run(&self, request: &TrainingUpload) -> AppResult<UploadSummary> {
        request.validate_shape()?;

        let project = request.project_name.as_str();
        validate_project_name(project)?;
        if !self.store.project_exists(project).await? {
            return Err(AppError::not_found(format!(
                "Project '{project}' does not exist."
            )));
        }

        let folders = self.provisioner.provision(project).await?;

        let mut tx = self.store.begin().await?;
        let mut written = Vec::new();
        let result = self
            .ingest(&mut *tx, request, &folders, &mut written)
            .await;

        let result = match result {
            Ok(outcome) => tx.commit().await.map(|()| outcome),
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "Failed to roll back upload transaction");
                }
                Err(e)
            }
        };

        match result {
            Ok(outcome) => Ok(self.summarize(project, &folders, outcome)),
            Err(e) => {
                if self.config.cleanup_on_failure {
                    self.ingestor.remove_written(&written).await;
                }
                Err(e)
            }
        }
    }

    async fn ingest(
        &self,
        tx: &mut dyn StoreTransaction,
        request: &TrainingUpload,
        folders: &ProjectFolders,
        written: &mut Vec<String>,
    ) -> AppResult<IngestOutcome> {
        let project = request.project_name.as_str();
        let mut outcome = IngestOutcome::default();

        for (index, entry) in request.training_data.iter().enumerate() {
            if let Some(file) = self
                .ingestor
                .ingest_image(tx, project, index, entry, folders, written)
                .await?
            {
                outcome.files.push(file);
            }
        }

        if let Some(model) = request.effective_model() {
            if let Some((info, file)) = self
                .ingestor
                .ingest_model(tx, project, model, folders, written)
                .await?
            {
                outcome.files.push(file);
                outcome.model_file = Some(info);
            }
        }

        Ok(outcome)
    }

    fn summarize(
        &self,
        project: &str,
        folders: &ProjectFolders,
        outcome: IngestOutcome,
    ) -> UploadSummary {
        let message = if outcome.model_file.is_some() {
            format!("Training data and model file (.h5) uploaded successfully. {REFRESH_HINT}")
        } else {
            format!("Training data uploaded successfully. {REFRESH_HINT}")
        };

        let count = outcome.files.len();
        UploadSummary {
            message,
            files: outcome.files,
            project: project.to_string(),
            count,
            folder_path: format!(
                "{}/{}",
                self.config.browser_prefix.trim_end_matches('/'),
                folders.project.path
            ),
            model_file: outcome.model_file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trainhub_core::error::ErrorKind;
    use trainhub_database::memory::MemoryDocumentStore;
    use trainhub_entity::{CreateProject, FileLabel};
    use trainhub_storage::LocalStorageProvider;

    use crate::training::request::{ModelUpload, TrainingEntry};

    const HELLO: &str = "aGVsbG8=";

    struct Fixture {
        dir: tempfile::TempDir,
        store: MemoryDocumentStore,
        service: TrainingDataService,
    }

    async fn fixture_with(config: IngestConfig) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorageProvider::new(dir.path().to_str().unwrap())
            .await
            .unwrap();
        let store = MemoryDocumentStore::new();
        store
            .create_project(&CreateProject {
                name: "P1".to_string(),
                description: None,
            })
            .await
            .unwrap();
        let service = TrainingDataService::new(
            Arc::new(store.clone()),
            Arc::new(storage),
            config,
            "/private/files",
        );
        Fixture {
            dir,
            store,
            service,
        }
    }

    async fn fixture() -> Fixture {
        fixture_with(IngestConfig::default()).await
    }

    fn upload(project: &str, entries: Vec<TrainingEntry>) -> TrainingUpload {
        TrainingUpload {
            project_name: project.to_string(),
            training_data: entries,
            model_file: None,
        }
    }

    fn files_in(dir: &tempfile::TempDir, label: &str) -> Vec<String> {
        let path = dir.path().join("Home/training_data/P1").join(label);
        match std::fs::read_dir(path) {
            Ok(entries) => entries
                .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_mixed_labels() {
        let f = fixture().await;
        let request = upload(
            "P1",
            vec![TrainingEntry::new(HELLO, "OK"), TrainingEntry::new(HELLO, "bad")],
        );

        let summary = f.service.upload(&request).await.unwrap();
        assert_eq!(summary.count, 1);
        assert_eq!(summary.files.len(), 1);
        assert_eq!(summary.files[0].label, FileLabel::Ok);
        assert!(summary.files[0].name.starts_with("P1ok1_"));
        assert_eq!(summary.project, "P1");
        assert_eq!(summary.folder_path, "/app/file/Home/training_data/P1");
        assert!(summary.model_file.is_none());
        assert_eq!(
            summary.message,
            "Training data uploaded successfully. Please refresh the file manager to see all files."
        );

        assert_eq!(files_in(&f.dir, "ok").len(), 1);
        assert!(files_in(&f.dir, "defective").is_empty());
        assert_eq!(f.store.file_count().await, 1);
    }

    #[tokio::test]
    async fn test_repeated_uploads_share_folders() {
        let f = fixture().await;
        let request = upload("P1", vec![TrainingEntry::new(HELLO, "defective")]);

        f.service.upload(&request).await.unwrap();
        f.service.upload(&request).await.unwrap();

        assert_eq!(f.store.folder_count().await, 5);
        let roots = f.store.find_children(None).await.unwrap();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].name, "training_data");
        assert_eq!(files_in(&f.dir, "defective").len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_project_touches_nothing() {
        let f = fixture().await;
        let err = f
            .service
            .upload(&upload("Ghost", vec![TrainingEntry::new(HELLO, "ok")]))
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(
            err.message,
            "Failed to upload training data or model: Project 'Ghost' does not exist."
        );
        assert_eq!(f.store.folder_count().await, 0);
        assert!(!f.dir.path().join("Home").exists());

        // A valid project still works afterwards.
        let summary = f
            .service
            .upload(&upload("P1", vec![TrainingEntry::new(HELLO, "ok")]))
            .await
            .unwrap();
        assert_eq!(summary.count, 1);
    }

    #[tokio::test]
    async fn test_missing_label_fails_whole_batch() {
        let f = fixture().await;
        let request = upload(
            "P1",
            vec![
                TrainingEntry::new(HELLO, "ok"),
                TrainingEntry {
                    image: Some(HELLO.to_string()),
                    label: None,
                },
            ],
        );

        let err = f.service.upload(&request).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.ends_with("Missing image or label."));
        assert_eq!(f.store.file_count().await, 0);
        assert_eq!(f.store.folder_count().await, 0);
    }

    #[tokio::test]
    async fn test_invalid_base64_rolls_back_and_cleans_up() {
        let f = fixture().await;
        let request = upload(
            "P1",
            vec![
                TrainingEntry::new(HELLO, "ok"),
                TrainingEntry::new("!!!", "ok"),
            ],
        );

        let err = f.service.upload(&request).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.starts_with(FAILURE_CONTEXT));
        assert_eq!(f.store.file_count().await, 0);
        assert!(files_in(&f.dir, "ok").is_empty());
    }

    #[tokio::test]
    async fn test_failed_upload_keeps_files_without_cleanup() {
        let f = fixture_with(IngestConfig {
            cleanup_on_failure: false,
            ..IngestConfig::default()
        })
        .await;
        let request = upload(
            "P1",
            vec![
                TrainingEntry::new(HELLO, "ok"),
                TrainingEntry::new("!!!", "ok"),
            ],
        );

        f.service.upload(&request).await.unwrap_err();
        assert_eq!(f.store.file_count().await, 0);
        assert_eq!(files_in(&f.dir, "ok").len(), 1);
    }

    #[tokio::test]
    async fn test_upload_with_model() {
        let f = fixture().await;
        let mut request = upload("P1", vec![TrainingEntry::new(HELLO, "defective")]);
        request.model_file = Some(ModelUpload::new("data:;base64,d2VpZ2h0cw==", "weights.txt"));

        let summary = f.service.upload(&request).await.unwrap();
        assert_eq!(summary.count, 2);
        assert_eq!(summary.count, summary.files.len());
        assert_eq!(summary.files[1].label, FileLabel::Model);

        let model = summary.model_file.unwrap();
        assert!(model.name.ends_with(".h5"));
        assert_eq!(model.original_name, "weights.txt");
        assert!(summary.message.contains("model file (.h5)"));

        let stored = std::fs::read(
            f.dir
                .path()
                .join("Home/training_data/P1/model")
                .join(&model.name),
        )
        .unwrap();
        assert_eq!(stored, b"weights");
    }

    #[tokio::test]
    async fn test_invalid_model_rolls_back_images() {
        let f = fixture().await;
        let mut request = upload("P1", vec![TrainingEntry::new(HELLO, "ok")]);
        request.model_file = Some(ModelUpload::new("!!!", "w.h5"));

        let err = f.service.upload(&request).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(
            err.message
                .starts_with("Failed to upload training data or model: Error saving model file")
        );
        assert_eq!(f.store.file_count().await, 0);
        assert!(files_in(&f.dir, "ok").is_empty());
        assert!(files_in(&f.dir, "model").is_empty());
    }

    #[tokio::test]
    async fn test_rejects_unsafe_project_name() {
        let f = fixture().await;
        let err = f
            .service
            .upload(&upload("../etc", Vec::new()))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(f.store.folder_count().await, 0);
    }
}
