// SPDX-License-Identifier: Apache-2.0
// SPDX-FileCopyrightText: 2026 Issue Moderator Contributors

#![no_main]

use libfuzzer_sys::fuzz_target;
use moderator_core::parse_issue_reference;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let (reference, repo) = s.split_once(' ').map_or((s, None), |(r, c)| (r, Some(c)));
        if let Ok(target) = parse_issue_reference(reference, repo) {
            // A parsed target round-trips through its short form.
            let again = parse_issue_reference(&target.to_string(), None)
                .expect("short form of a parsed target must parse");
            assert_eq!(again, target);
        }
    }
});
