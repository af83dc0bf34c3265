use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

#[allow(unused_imports)]
use log::{debug, info, warn, error};

use crate::config;

pub fn get_filename(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|os_str| os_str.to_str())
        .map(|s| s.to_string())
}

pub fn is_directory(path: &Path) -> bool {
    fs::metadata(path).map(|metadata| metadata.is_dir()).unwrap_or(false)
}

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .map(|ext| config::ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

pub fn get_image_paths(directory_path: &Path) -> Vec<PathBuf> {
    let mut image_paths: Vec<PathBuf> = Vec::new();

    if let Ok(paths) = fs::read_dir(directory_path) {
        for entry in paths.flatten() {
            if is_supported_image(&entry.path()) {
                image_paths.push(entry.path());
            }
        }
    }

    // Sort paths like Nautilus file viewer. `image_paths.sort()` does not work as expected
    alphanumeric_sort::sort_path_slice(&mut image_paths);
    image_paths
}

/// Expands command line arguments into a flat slide list: a directory
/// contributes its images in natural order, anything else passes through.
/// A missing or undecodable file shows up later as a failed slide, not as a
/// startup error.
pub fn collect_sources(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut sources: Vec<PathBuf> = Vec::new();

    for path in paths {
        if is_directory(path) {
            let mut images = get_image_paths(path);
            if images.is_empty() {
                warn!("No supported images in directory: {}", path.display());
            }
            sources.append(&mut images);
        } else {
            if !is_supported_image(path) {
                warn!("Unrecognized extension for {}, loading it anyway", path.display());
            }
            sources.push(path.clone());
        }
    }

    sources
}
