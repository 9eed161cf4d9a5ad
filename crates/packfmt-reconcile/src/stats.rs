//! Run statistics.

use serde::Serialize;
use std::fmt;

use crate::format::SpecifierKind;
use crate::manifest::{Manifest, ReleaseClass};
use crate::specifier::SpecifierMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub latest_release: String,
    pub latest_snapshot: String,
    pub manifest_total: usize,
    pub releases: usize,
    pub snapshots: usize,
    pub old_betas: usize,
    pub old_alphas: usize,
    pub specified_total: usize,
    pub verified: usize,
    pub unverified: usize,
    pub maybe: usize,
    pub unknown: usize,
    pub none: usize,
}

impl Stats {
    pub fn collect(manifest: &Manifest, specifiers: &SpecifierMap) -> Self {
        let classes = |class: ReleaseClass| {
            manifest
                .entries()
                .iter()
                .filter(|e| e.release_class == class)
                .count()
        };
        let kinds = |kind: SpecifierKind| specifiers.values().filter(|s| s.kind() == kind).count();

        Self {
            latest_release: manifest.latest.release.clone(),
            latest_snapshot: manifest.latest.snapshot.clone(),
            manifest_total: manifest.len(),
            releases: classes(ReleaseClass::Release),
            snapshots: classes(ReleaseClass::Snapshot),
            old_betas: classes(ReleaseClass::OldBeta),
            old_alphas: classes(ReleaseClass::OldAlpha),
            specified_total: specifiers.len(),
            verified: kinds(SpecifierKind::Verified),
            unverified: kinds(SpecifierKind::Unverified),
            maybe: kinds(SpecifierKind::Maybe),
            unknown: kinds(SpecifierKind::Unknown),
            none: kinds(SpecifierKind::None),
        }
    }

    pub fn log(&self) {
        tracing::info!(
            latest_release = %self.latest_release,
            latest_snapshot = %self.latest_snapshot,
            manifest = self.manifest_total,
            releases = self.releases,
            snapshots = self.snapshots,
            old_betas = self.old_betas,
            old_alphas = self.old_alphas,
            specified = self.specified_total,
            verified = self.verified,
            unverified = self.unverified,
            maybe = self.maybe,
            unknown = self.unknown,
            none = self.none,
            "run stats"
        );
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "latest: {}, snapshot: {}", self.latest_release, self.latest_snapshot)?;
        writeln!(f, "{} versions in manifest", self.manifest_total)?;
        writeln!(f, "   {} releases", self.releases)?;
        writeln!(f, "   {} snapshots", self.snapshots)?;
        writeln!(f, "   {} old betas", self.old_betas)?;
        writeln!(f, "   {} old alphas", self.old_alphas)?;
        writeln!(f, "{} versions specified in record", self.specified_total)?;
        writeln!(f, "   {} verified", self.verified)?;
        writeln!(f, "   {} unverified", self.unverified)?;
        writeln!(f, "   {} maybe", self.maybe)?;
        writeln!(f, "   {} unknown", self.unknown)?;
        write!(f, "   {} none", self.none)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specifier::parse_record;
    use packfmt_test_utils::fixtures;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn sample() -> Stats {
        let manifest = Manifest::from_json(
            fixtures::manifest(vec![
                fixtures::version("1.1", "release", "2020-01-04T00:00:00Z"),
                fixtures::version("20w01a", "snapshot", "2020-01-03T00:00:00Z"),
                fixtures::version("1.0", "release", "2020-01-02T00:00:00Z"),
                fixtures::version("b1.0", "old_beta", "2020-01-01T00:00:00Z"),
            ])
            .to_string()
            .as_bytes(),
            "test",
        )
        .unwrap();
        let specifiers = parse_record("1.1 2 verified\n1.0 1 maybe\nb1.0 none\nx unknown\n")
            .into_specifiers()
            .unwrap();
        Stats::collect(&manifest, &specifiers)
    }

    #[test]
    fn test_collect_counts() {
        let stats = sample();
        assert_eq!(stats.latest_release, "1.1");
        assert_eq!(stats.latest_snapshot, "20w01a");
        assert_eq!(stats.manifest_total, 4);
        assert_eq!((stats.releases, stats.snapshots, stats.old_betas, stats.old_alphas), (2, 1, 1, 0));
        assert_eq!(stats.specified_total, 4);
        assert_eq!((stats.verified, stats.unverified, stats.maybe, stats.unknown, stats.none), (1, 0, 1, 1, 1));

        let text = stats.to_string();
        assert!(text.starts_with("latest: 1.1, snapshot: 20w01a"));
        assert!(text.contains("   2 releases"));
    }

    #[test]
    fn test_log_includes_release_class_counts() {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(captured.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || sample().log());

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("run stats"), "{output}");
        for field in ["releases=2", "snapshots=1", "old_betas=1", "old_alphas=0", "verified=1"] {
            assert!(output.contains(field), "missing {field} in {output}");
        }
    }
}
