//! Bulk upload of a local directory.
//!
//! The directory is expected to contain `ok/` and `defective/`
//! subdirectories of images. Every file found is base64-encoded and sent
//! through the same workflow as the HTTP upload.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use clap::Args;

use crate::output::{self, OutputFormat};
use trainhub_core::config::AppConfig;
use trainhub_core::error::{AppError, ErrorKind};
use trainhub_core::traits::storage::StorageProvider;
use trainhub_entity::FileLabel;
use trainhub_service::TrainingDataService;
use trainhub_service::training::{ModelUpload, TrainingEntry, TrainingUpload};
use trainhub_storage::LocalStorageProvider;

/// Arguments for the upload command
#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Target project
    #[arg(short, long)]
    pub project: String,

    /// Directory with `ok/` and `defective/` subdirectories
    pub dir: PathBuf,

    /// Trained model file to upload alongside the images
    #[arg(short, long)]
    pub model: Option<PathBuf>,
}

/// Execute the upload command
pub async fn execute(
    args: &UploadArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let training_data = collect_entries(&args.dir).await?;
    if training_data.is_empty() {
        output::print_warning("No images found under ok/ or defective/.");
    }

    let model_file = match &args.model {
        Some(path) => Some(read_model(path).await?),
        None => None,
    };

    let store = super::open_store(config).await?;
    let storage: Arc<dyn StorageProvider> =
        Arc::new(LocalStorageProvider::new(&config.storage.private_root).await?);
    let service = TrainingDataService::new(
        store,
        storage,
        config.ingest.clone(),
        config.storage.url_prefix.clone(),
    );

    let summary = service
        .upload(&TrainingUpload {
            project_name: args.project.clone(),
            training_data,
            model_file,
        })
        .await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&summary).unwrap_or_else(|_| "{}".to_string());
            println!("{json}");
        }
        OutputFormat::Table => {
            output::print_success(&summary.message);
            output::print_kv("Project", &summary.project);
            output::print_kv("Files", &summary.count.to_string());
            output::print_kv("Folder", &summary.folder_path);
            if let Some(model) = &summary.model_file {
                output::print_kv("Model", &format!("{} ({})", model.name, model.original_name));
            }
        }
    }

    Ok(())
}

/// Read `ok/` then `defective/` below `dir`, each in file-name order.
async fn collect_entries(dir: &Path) -> Result<Vec<TrainingEntry>, AppError> {
    if !tokio::fs::try_exists(dir).await.unwrap_or(false) {
        return Err(AppError::not_found(format!(
            "Directory not found: {}",
            dir.display()
        )));
    }

    let mut entries = Vec::new();
    for label in [FileLabel::Ok, FileLabel::Defective] {
        for path in list_files(&dir.join(label.as_str())).await? {
            let data = read_file(&path).await?;
            entries.push(TrainingEntry::new(STANDARD.encode(data), label.as_str()));
        }
    }
    Ok(entries)
}

async fn list_files(dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    let mut read_dir = match tokio::fs::read_dir(dir).await {
        Ok(read_dir) => read_dir,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to read directory: {}", dir.display()),
                e,
            ));
        }
    };

    let mut files = Vec::new();
    while let Some(entry) = read_dir.next_entry().await? {
        if entry.file_type().await?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

async fn read_model(path: &Path) -> Result<ModelUpload, AppError> {
    let data = read_file(path).await?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| AppError::validation(format!("Not a file: {}", path.display())))?;
    Ok(ModelUpload::new(STANDARD.encode(data), name))
}

async fn read_file(path: &Path) -> Result<Vec<u8>, AppError> {
    tokio::fs::read(path).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Storage,
            format!("Failed to read {}", path.display()),
            e,
        )
    })
}
