//! Pending-status seeding pass over the whole asset tree

use glbv_common::layout::walk_assets;
use glbv_common::metadata::{seed_pending_status, SeedReason};
use std::path::{Path, PathBuf};

/// Result of seeding every video under a data root
#[derive(Debug, Clone, Default)]
pub struct SeedPass {
    /// Metadata path and outcome, in walk order
    pub results: Vec<(PathBuf, SeedReason)>,
}

impl SeedPass {
    pub fn examined(&self) -> usize {
        self.results.len()
    }

    pub fn updated(&self) -> usize {
        self.results.iter().filter(|(_, r)| r.changed()).count()
    }

    pub fn skipped(&self) -> usize {
        self.examined() - self.updated()
    }

    pub fn errors(&self) -> usize {
        self.results.iter().filter(|(_, r)| r.is_error()).count()
    }
}

/// Seed `status: pending` into every existing `metadata.yaml` under `data_root`
pub fn run(data_root: &Path) -> glbv_common::Result<SeedPass> {
    let mut pass = SeedPass::default();
    for asset in walk_assets(data_root)? {
        let reason = seed_pending_status(&asset.dir);
        pass.results.push((asset.metadata_path(), reason));
    }
    Ok(pass)
}
