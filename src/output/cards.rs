// Card writer: one card file per package

use crate::doc::PackageDoc;
use crate::error::Result;
use crate::output::templates::CardTemplate;
use crate::parser::Package;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

/// Writes rendered card decks into an output directory
pub struct CardWriter {
    template: CardTemplate,
    prefix: String,
    out_dir: PathBuf,
}

impl CardWriter {
    pub fn new(template: CardTemplate, prefix: impl Into<String>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            template,
            prefix: prefix.into(),
            out_dir: out_dir.into(),
        }
    }

    /// Path the cards for a package land at: `<out_dir>/<prefix><name>`
    pub fn card_path(&self, pkg_name: &str) -> PathBuf {
        self.out_dir.join(format!("{}{}", self.prefix, pkg_name))
    }

    /// Render one package's cards to its output file, truncating any
    /// existing file. Packages named `main` are skipped entirely; for them
    /// no file is produced and `Ok(None)` is returned.
    ///
    /// Template output streams straight to the file, so a failed render can
    /// leave a partial file behind; it is not cleaned up.
    pub fn write_package(&self, pkg: &Package) -> Result<Option<PathBuf>> {
        if pkg.name == "main" {
            return Ok(None);
        }

        let doc = PackageDoc::build(pkg);
        let path = self.card_path(&pkg.name);
        let file = File::create(&path)?;
        self.template.render_to(&doc, BufWriter::new(file))?;

        Ok(Some(path))
    }
}
