//! Analysis driver
//!
//! Runs the sizes and problems analyses as independent tasks and emits
//! each result (or serialized failure) as its own protocol message the
//! moment it resolves. Neither analysis gates the other, and neither can
//! abort the build-success reporting that already happened.

use packboard_core::{
    AnalysisOptions, BundleProblems, Compilation, Message, PackboardError, Result,
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::bundle::{collect_bundles, Bundle};
use crate::duplicates::analyze_duplicates;
use crate::sizes::analyze_sizes;
use crate::versions::{analyze_versions, resolve_project_root};

fn analyze_problems(bundles: &[Bundle], options: &AnalysisOptions) -> Result<Vec<BundleProblems>> {
    bundles
        .iter()
        .map(|bundle| {
            let duplicates = analyze_duplicates(bundle);
            // An unresolvable root skips versions for this bundle instead
            // of failing the whole pipeline.
            let versions = match resolve_project_root(&bundle.context, options.root.as_deref()) {
                Some(root) => Some(analyze_versions(bundle, &root)?),
                None => None,
            };
            Ok(BundleProblems {
                path: bundle.path.clone(),
                duplicates,
                versions,
            })
        })
        .collect()
}

/// Kick off both analyses for a finished compilation
///
/// `sizes` and `problems` messages arrive on `tx` independently, each as
/// soon as its analysis resolves.
pub fn spawn_analysis(
    compilation: Compilation,
    options: AnalysisOptions,
    tx: UnboundedSender<Message>,
) {
    let bundles = collect_bundles(&compilation, &options);
    debug!("analyzing {} bundle(s)", bundles.len());

    {
        let bundles = bundles.clone();
        let options = options.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let outcome =
                tokio::task::spawn_blocking(move || analyze_sizes(&bundles, &options)).await;
            let message = match outcome {
                Ok(Ok(reports)) => {
                    Message::sizes(&reports).unwrap_or_else(|e| Message::sizes_error(&e))
                }
                Ok(Err(e)) => Message::sizes_error(&e),
                Err(e) => Message::sizes_error(&PackboardError::Analysis(e.to_string())),
            };
            let _ = tx.send(message);
        });
    }

    tokio::spawn(async move {
        let outcome =
            tokio::task::spawn_blocking(move || analyze_problems(&bundles, &options)).await;
        let message = match outcome {
            Ok(Ok(reports)) => {
                Message::problems(&reports).unwrap_or_else(|e| Message::problems_error(&e))
            }
            Ok(Err(e)) => Message::problems_error(&e),
            Err(e) => Message::problems_error(&PackboardError::Analysis(e.to_string())),
        };
        let _ = tx.send(message);
    });
}
