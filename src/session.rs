//! The interactive workflow: scan, choose a mode, compress, collect
//! metadata, save the catalog and print a summary.

use crate::catalog::{Catalog, Work};
use crate::collector::{batch_works, current_date_stamp, prompt_batch_defaults, prompt_work_info};
use crate::config::Config;
use crate::console::Console;
use crate::constants::EXISTING_PREVIEW_LIMIT;
use crate::error::Result;
use crate::processing::compress_image;
use crate::scanner::{output_filename, scan_source_dir};
use crate::utils::{create_progress_spinner, format_file_size};
use crate::verbose;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Prompt for every image.
    PerItem,
    /// One shared template for the new images.
    Batch,
    /// Batch over every source image, replacing the catalog.
    ReprocessAll,
}

impl Mode {
    /// Menu answer to mode. Anything unrecognized selects per-item.
    pub fn from_choice(input: &str) -> Self {
        match input.trim() {
            "2" => Mode::Batch,
            "3" => Mode::ReprocessAll,
            _ => Mode::PerItem,
        }
    }
}

/// What a run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// `None` when the run ended before the menu.
    pub mode: Option<Mode>,
    pub processed: usize,
    pub failed: usize,
    pub total_works: usize,
    pub total_output_bytes: u64,
    /// Whether the catalog file was written.
    pub saved: bool,
}

pub struct Session<'a, C: Console + ?Sized> {
    config: &'a Config,
    console: &'a mut C,
    date: String,
}

impl<'a, C: Console + ?Sized> Session<'a, C> {
    pub fn new(config: &'a Config, console: &'a mut C) -> Self {
        Self {
            config,
            console,
            date: current_date_stamp(),
        }
    }

    /// Overrides the `YYYY-MM` stamp written into new records.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn run(&mut self) -> Result<RunSummary> {
        self.console.header("Portfolio preprocessing")?;

        self.config.validate()?;
        self.config.prepare_directories()?;

        let src_files = scan_source_dir(&self.config.src_dir)?;
        if src_files.is_empty() {
            self.console.warning(&format!(
                "No images found in {}",
                self.config.src_dir.display()
            ))?;
            self.console.info(&format!(
                "Put the original images in {} and run again",
                self.config.src_dir.display()
            ))?;
            return Ok(RunSummary::default());
        }
        self.console
            .info(&format!("Found {} images", src_files.len()))?;

        let metadata_path = self.config.metadata_path();
        let mut catalog = Catalog::load(&metadata_path)?;
        let (new_files, existing_files) = self.partition(&src_files, &catalog);
        self.announce(&new_files, &existing_files)?;

        self.console.write_line("")?;
        self.console.write_line("Processing modes:")?;
        self.console
            .write_line("  1. One by one (enter details for each image)")?;
        self.console
            .write_line("  2. Batch (same details for every new image)")?;
        self.console
            .write_line("  3. Reprocess everything (overwrites existing images)")?;
        let mode = Mode::from_choice(&self.console.ask_or("\nChoose a mode", "1")?);
        verbose!("Selected mode {:?}", mode);

        let mut summary = RunSummary {
            mode: Some(mode),
            ..RunSummary::default()
        };

        let outcome = match mode {
            Mode::PerItem => {
                let files = if new_files.is_empty() {
                    &existing_files
                } else {
                    &new_files
                };
                self.run_per_item(files, &mut catalog)?
            }
            Mode::Batch => self.run_batch(&new_files, &mut catalog)?,
            Mode::ReprocessAll => self.run_reprocess_all(&src_files, &mut catalog)?,
        };

        if let Some((processed, failed)) = outcome {
            catalog.save(&metadata_path)?;
            summary.processed = processed;
            summary.failed = failed;
            summary.saved = true;

            self.console
                .success(&format!("Processed {} images", processed))?;
            if failed > 0 {
                self.console
                    .warning(&format!("{} images failed and were skipped", failed))?;
            }
        }

        summary.total_works = catalog.len();
        summary.total_output_bytes = catalog.total_output_size(&self.config.output_dir);
        self.print_summary(&summary)?;
        Ok(summary)
    }

    /// Splits the scanned files by whether their output name is already cataloged.
    fn partition(&self, src_files: &[String], catalog: &Catalog) -> (Vec<String>, Vec<String>) {
        src_files.iter().cloned().partition(|file| {
            match output_filename(file, self.config.compression.format) {
                Ok(name) => !catalog.contains(&name),
                Err(_) => true,
            }
        })
    }

    fn announce(&mut self, new_files: &[String], existing_files: &[String]) -> Result<()> {
        if !existing_files.is_empty() {
            self.console.warning(&format!(
                "{} images are already in the catalog:",
                existing_files.len()
            ))?;
            for file in existing_files.iter().take(EXISTING_PREVIEW_LIMIT) {
                self.console.write_line(&format!("   - {}", file))?;
            }
            if existing_files.len() > EXISTING_PREVIEW_LIMIT {
                self.console.write_line(&format!(
                    "   ... and {} more",
                    existing_files.len() - EXISTING_PREVIEW_LIMIT
                ))?;
            }
        }

        if !new_files.is_empty() {
            self.console
                .success(&format!("{} new images to process", new_files.len()))?;
        }
        Ok(())
    }

    /// Compresses then prompts for each file, upserting the records.
    fn run_per_item(
        &mut self,
        files: &[String],
        catalog: &mut Catalog,
    ) -> Result<Option<(usize, usize)>> {
        if files.is_empty() {
            self.console.warning("No images to process")?;
            return Ok(None);
        }

        let mut processed = 0;
        let mut failed = 0;
        for (i, source) in files.iter().enumerate() {
            self.console
                .write_line(&format!("\nProgress: [{}/{}]", i + 1, files.len()))?;

            let Some(output_name) = self.compress_one(source)? else {
                failed += 1;
                continue;
            };

            let work = prompt_work_info(
                &mut *self.console,
                source,
                &output_name,
                &self.config.defaults,
                &self.date,
            )?;
            if catalog.upsert(work) {
                verbose!("Updated catalog entry {}", output_name);
            }
            processed += 1;
        }

        Ok(Some((processed, failed)))
    }

    fn run_batch(
        &mut self,
        new_files: &[String],
        catalog: &mut Catalog,
    ) -> Result<Option<(usize, usize)>> {
        if new_files.is_empty() {
            self.console.warning("No new images to process")?;
            return Ok(None);
        }

        let (works, failed) = self.compress_batch(new_files)?;
        let processed = works.len();
        for work in works {
            catalog.upsert(work);
        }
        Ok(Some((processed, failed)))
    }

    fn run_reprocess_all(
        &mut self,
        src_files: &[String],
        catalog: &mut Catalog,
    ) -> Result<Option<(usize, usize)>> {
        let confirm = self
            .console
            .ask("Reprocess every image? Existing output will be overwritten (y/N): ")?;
        if !confirm.eq_ignore_ascii_case("y") {
            self.console.info("Cancelled, nothing was changed")?;
            return Ok(None);
        }

        let (works, failed) = self.compress_batch(src_files)?;
        let processed = works.len();
        catalog.replace_all(works);
        Ok(Some((processed, failed)))
    }

    /// Batch template first, then compression; returns the records of the
    /// files that compressed and the failure count.
    fn compress_batch(&mut self, files: &[String]) -> Result<(Vec<Work>, usize)> {
        let defaults = prompt_batch_defaults(&mut *self.console, &self.config.defaults)?;
        let placeholders = batch_works(files, &defaults, &self.date);
        let total = placeholders.len();

        let mut done = Vec::with_capacity(total);
        let mut failed = 0;
        for (i, mut work) in placeholders.into_iter().enumerate() {
            self.console
                .write_line(&format!("\n[{}/{}] Processing: {}", i + 1, total, work.filename))?;

            match self.compress_one(&work.filename)? {
                Some(output_name) => {
                    work.filename = output_name;
                    done.push(work);
                }
                None => failed += 1,
            }
        }

        Ok((done, failed))
    }

    /// Compresses one source file into the output directory.
    ///
    /// Returns the output filename, or `None` after reporting a failure.
    /// Only console errors are propagated.
    fn compress_one(&mut self, source: &str) -> Result<Option<String>> {
        let output_name = match output_filename(source, self.config.compression.format) {
            Ok(name) => name,
            Err(e) => {
                self.console
                    .failure(&format!("Compression failed for {}: {}", source, e))?;
                return Ok(None);
            }
        };

        let input_path = self.config.source_path(source);
        let output_path = self.config.output_path(&output_name);

        let pb = create_progress_spinner(&format!("Compressing {}...", source));
        let result = compress_image(&input_path, &output_path, &self.config.compression);
        pb.finish_and_clear();

        match result {
            Ok(report) => {
                self.console.success(&format!(
                    "Compressed: {} → {} (saved {:.1}%)",
                    format_file_size(report.original_size),
                    format_file_size(report.compressed_size),
                    report.savings_percent()
                ))?;
                Ok(Some(output_name))
            }
            Err(e) => {
                verbose!("Compression of {:?} failed: {:?}", input_path, e);
                self.console
                    .failure(&format!("Compression failed for {}: {}", source, e))?;
                Ok(None)
            }
        }
    }

    fn print_summary(&mut self, summary: &RunSummary) -> Result<()> {
        self.console.header("Done")?;
        self.console
            .info(&format!("Works in catalog: {}", summary.total_works))?;
        self.console.info(&format!(
            "Total size: {}",
            format_file_size(summary.total_output_bytes)
        ))?;
        self.console.success(&format!(
            "Metadata file: {}",
            self.config.metadata_path().display()
        ))?;
        self.console.success(&format!(
            "Image directory: {}/",
            self.config.output_dir.display()
        ))
    }
}
