//! Host architecture detection from a browser User-Agent.

use regex::Regex;
use std::sync::LazyLock;

static LINUX_ARCH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Linux +(?P<arch>[a-z0-9_]+)").unwrap());

/// Returns the architecture token of a Linux browser, `None` otherwise.
pub fn detect_arch(user_agent: &str) -> Option<String> {
    let caps = LINUX_ARCH.captures(user_agent)?;
    let arch = match &caps["arch"] {
        "x64" => "x86_64",
        other => other,
    };
    Some(arch.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_linux_arch() {
        let ua = "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0";
        assert_eq!(detect_arch(ua).as_deref(), Some("x86_64"));

        let ua = "Mozilla/5.0 (X11; Linux aarch64) AppleWebKit/537.36";
        assert_eq!(detect_arch(ua).as_deref(), Some("aarch64"));
    }

    #[test]
    fn test_x64_is_normalised() {
        let ua = "Mozilla/5.0 (X11; Linux x64) AppleWebKit/537.36";
        assert_eq!(detect_arch(ua).as_deref(), Some("x86_64"));
    }

    #[test]
    fn test_non_linux_hosts() {
        let ua = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
        assert_eq!(detect_arch(ua), None);
        assert_eq!(detect_arch(""), None);
    }
}
