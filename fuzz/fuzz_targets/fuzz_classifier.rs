#![no_main]

use haven::{IssueClassifier, TierScan};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    for scan in [TierScan::Faithful, TierScan::Ordered] {
        let classifier = IssueClassifier::with_tier_scan(scan);
        let analysis = classifier.classify(text);

        assert!(analysis.secondary_issues.len() <= 2);
        if let Some(primary) = analysis.primary_issue {
            assert!(!analysis.secondary_issues.contains(&primary));
        } else {
            assert!(analysis.secondary_issues.is_empty());
        }
        if classifier.has_critical_signal(text) {
            assert!(analysis.needs_immediate_attention);
        }

        // Output must always serialize.
        let _ = serde_json::to_string(&analysis).unwrap();
    }
});
