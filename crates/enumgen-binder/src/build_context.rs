//! Target platform and build tags used to select a package's files.

use enumgen_parser::Constraint;
use rustc_hash::FxHashSet;

const KNOWN_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "js", "linux",
    "nacl", "netbsd", "openbsd", "plan9", "solaris", "wasip1", "windows", "zos",
];

const KNOWN_ARCH: &[&str] = &[
    "386",
    "amd64",
    "amd64p32",
    "arm",
    "armbe",
    "arm64",
    "arm64be",
    "loong64",
    "mips",
    "mipsle",
    "mips64",
    "mips64le",
    "mips64p32",
    "mips64p32le",
    "ppc",
    "ppc64",
    "ppc64le",
    "riscv",
    "riscv64",
    "s390",
    "s390x",
    "sparc",
    "sparc64",
    "wasm",
];

const UNIX_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "linux",
    "netbsd", "openbsd", "solaris",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    pub goos: String,
    pub goarch: String,
    /// Satisfies the `cgo` tag.
    pub cgo: bool,
    tags: FxHashSet<String>,
}

impl Default for BuildContext {
    fn default() -> Self {
        Self::host()
    }
}

impl BuildContext {
    pub fn new(goos: impl Into<String>, goarch: impl Into<String>) -> Self {
        BuildContext {
            goos: goos.into(),
            goarch: goarch.into(),
            cgo: false,
            tags: FxHashSet::default(),
        }
    }

    /// The platform this process runs on, in Go's naming.
    pub fn host() -> Self {
        let goos = match std::env::consts::OS {
            "macos" => "darwin",
            other => other,
        };
        let goarch = match std::env::consts::ARCH {
            "x86_64" => "amd64",
            "x86" => "386",
            "aarch64" => "arm64",
            "loongarch64" => "loong64",
            "powerpc" => "ppc",
            "powerpc64" if cfg!(target_endian = "little") => "ppc64le",
            "powerpc64" => "ppc64",
            "wasm32" => "wasm",
            other => other,
        };
        Self::new(goos, goarch).with_cgo(true)
    }

    /// The host platform, overridden by `GOOS`/`GOARCH` when set.
    ///
    /// `cgo` follows `CGO_ENABLED`; when unset it holds for native builds
    /// only, as with the go command.
    pub fn from_env() -> Self {
        let host = Self::host();
        let mut ctx = host.clone();
        if let Ok(goos) = std::env::var("GOOS")
            && !goos.is_empty()
        {
            ctx.goos = goos;
        }
        if let Ok(goarch) = std::env::var("GOARCH")
            && !goarch.is_empty()
        {
            ctx.goarch = goarch;
        }
        ctx.cgo = match std::env::var("CGO_ENABLED").as_deref() {
            Ok("0") => false,
            Ok("1") => true,
            _ => ctx.goos == host.goos && ctx.goarch == host.goarch,
        };
        ctx
    }

    pub fn with_cgo(mut self, enabled: bool) -> Self {
        self.cgo = enabled;
        self
    }

    /// Add user build tags. Empty entries are ignored.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for tag in tags {
            let tag = tag.as_ref().trim();
            if !tag.is_empty() {
                self.tags.insert(tag.to_string());
            }
        }
        self
    }

    pub fn user_tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        if self.tags.contains(tag) || tag == self.goos || tag == self.goarch || tag == "gc" {
            return true;
        }
        match tag {
            "unix" => UNIX_OS.contains(&self.goos.as_str()),
            "linux" => self.goos == "android",
            "solaris" => self.goos == "illumos",
            "darwin" => self.goos == "ios",
            "cgo" => self.cgo,
            _ => is_release_tag(tag),
        }
    }

    pub fn matches(&self, constraint: &Constraint) -> bool {
        constraint.eval(&|tag| self.has_tag(tag))
    }

    /// Whether a file name is eligible before its contents are read: a
    /// non-test `.go` file, not hidden, whose `_GOOS`/`_GOARCH` suffixes match.
    pub fn matches_file_name(&self, file_name: &str) -> bool {
        let Some(stem) = file_name.strip_suffix(".go") else {
            return false;
        };
        if stem.ends_with("_test") || file_name.starts_with(['_', '.']) {
            return false;
        }
        let Some(idx) = stem.find('_') else {
            return true;
        };
        let parts: Vec<&str> = stem[idx..].split('_').collect();
        let n = parts.len();
        if n >= 2 && KNOWN_OS.contains(&parts[n - 2]) && KNOWN_ARCH.contains(&parts[n - 1]) {
            return self.has_tag(parts[n - 2]) && self.has_tag(parts[n - 1]);
        }
        let last = parts[n - 1];
        if KNOWN_OS.contains(&last) || KNOWN_ARCH.contains(&last) {
            return self.has_tag(last);
        }
        true
    }
}

/// `go1.N` tags are satisfied for every minor version.
fn is_release_tag(tag: &str) -> bool {
    tag.strip_prefix("go1.")
        .is_some_and(|minor| !minor.is_empty() && minor.bytes().all(|b| b.is_ascii_digit()))
}
