//! Shell scripts that stand in for the BLAST+ executables
//!
//! Install them with [`TestEnvironment::install_tool`](crate::TestEnvironment::install_tool).

/// HTML the success script prints
pub const SUCCESS_REPORT: &str = "<html><body><pre>BLASTN 2.15.0+ fake report</pre></body></html>";

/// Print a fixed report on standard output
pub fn success_report() -> String {
    format!("#!/bin/sh\nprintf '%s' '{}'\n", SUCCESS_REPORT)
}

/// Print one argument per line
pub fn echo_args() -> String {
    "#!/bin/sh\nfor arg in \"$@\"; do printf '%s\\n' \"$arg\"; done\n".to_string()
}

/// Print the query file (the third argument)
pub fn echo_query() -> String {
    "#!/bin/sh\ncat \"$3\"\n".to_string()
}

/// Write the report to the path following `-out`
pub fn report_to_out_file() -> String {
    format!(
        "#!/bin/sh\nwhile [ $# -gt 0 ]; do\n  if [ \"$1\" = \"-out\" ]; then printf '%s' '{}' > \"$2\"; fi\n  shift\ndone\n",
        SUCCESS_REPORT
    )
}

/// Sleep well past any test timeout
pub fn sleep_for(seconds: u64) -> String {
    format!("#!/bin/sh\nsleep {}\n", seconds)
}

/// Write `stderr` and exit with `code`
pub fn failing(stderr: &str, code: i32) -> String {
    format!("#!/bin/sh\necho '{}' >&2\nexit {}\n", stderr, code)
}
