//! 콘솔 리포터 포트 구현 어댑터.

use std::io::{self, Write};

use crate::application::ports::Reporter;

/// stdout 전용 리포터 어댑터.
/// 파이프가 먼저 닫혀도(`| head`) 패닉 없이 출력을 버린다.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    fn emit(&self, line: &str) {
        let _ = writeln!(io::stdout().lock(), "{line}");
    }
}

impl Reporter for ConsoleReporter {
    fn section(&self, name: &str) {
        self.emit("");
        self.emit(&format!("===================== {name} ====================="));
    }

    fn kv(&self, key: &str, value: &str) {
        self.emit(&format!("{key:<12}: {value}"));
    }

    fn raw(&self, line: &str) {
        self.emit(line);
    }
}
