// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// A fresh, not yet created directory under the system temp dir.
pub fn create_test_dir() -> PathBuf {
    let dir_id: usize = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir: PathBuf = std::env::temp_dir().join(format!(
        "checkin_report_session_test_{}_{dir_id}",
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}
