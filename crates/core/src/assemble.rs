//! Output assembler: renders an ordered sequence as one header.
//!
//! Layout: license comment, provenance comment listing the inputs leaf-first,
//! a single guard pair, the sorted external includes, then each fragment body
//! between two banner lines naming it.

use crate::license::License;
use crate::sequence::Sequence;

/// Total width of a fragment banner line.
pub const BANNER_WIDTH: usize = 80;

/// Guard macro used when the caller does not name one.
pub const DEFAULT_GUARD: &str = "CWISSTABLE_H_";

/// Tool name written into the provenance comment by default.
pub const DEFAULT_GENERATOR: &str = "agglomerate";

/// Settings for one assembly.
#[derive(Debug, Clone)]
pub struct AssembleOptions {
    pub guard: String,
    pub license: License,
    pub generator: String,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            guard: DEFAULT_GUARD.into(),
            license: License::default(),
            generator: DEFAULT_GENERATOR.into(),
        }
    }
}

/// Render the merged header text.
pub fn assemble(sequence: &Sequence<'_>, options: &AssembleOptions) -> String {
    let mut out = String::new();

    for line in options.license.lines() {
        push_line(&mut out, line);
    }
    out.push('\n');

    push_line(&mut out, "// THIS IS A GENERATED FILE! DO NOT EDIT DIRECTLY!");
    push_line(
        &mut out,
        &format!(
            "// Generated using {}, by concatenating, in order:",
            options.generator
        ),
    );
    for identity in sequence.leaf_first() {
        push_line(&mut out, &format!("// #include \"{identity}\""));
    }
    out.push('\n');

    push_line(&mut out, &format!("#ifndef {}", options.guard));
    push_line(&mut out, &format!("#define {}", options.guard));
    out.push('\n');

    for include in sequence.graph().external_includes() {
        push_line(&mut out, &format!("#include {include}"));
    }
    out.push('\n');

    for fragment in sequence.fragments() {
        let banner = banner(&fragment.identity);
        push_line(&mut out, &banner);
        push_line(&mut out, &fragment.body);
        push_line(&mut out, &banner);
        out.push('\n');
    }

    push_line(&mut out, &format!("#endif  // {}", options.guard));
    out
}

/// `/// <identity> /` padded with `/` to [`BANNER_WIDTH`] characters.
pub fn banner(identity: &str) -> String {
    let mut line = format!("/// {identity} /");
    let width = line.chars().count();
    if width < BANNER_WIDTH {
        line.extend(std::iter::repeat_n('/', BANNER_WIDTH - width));
    }
    line
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::Fragment;
    use crate::graph::IncludeGraph;

    fn chain() -> IncludeGraph {
        IncludeGraph::build([
            Fragment::parse("base.h", "#ifndef BASE_H_\n#define BASE_H_\n#include <stdint.h>\nX\n#endif  // BASE_H_"),
            Fragment::parse("mid.h", "#ifndef MID_H_\n#define MID_H_\n#include \"base.h\"\n#include <stdint.h>\nY\n#endif  // MID_H_"),
            Fragment::parse("top.h", "#ifndef TOP_H_\n#define TOP_H_\n#include \"mid.h\"\n#include <stddef.h>\nZ\n#endif  // TOP_H_"),
        ])
    }

    #[test]
    fn banner_is_exactly_eighty_columns() {
        let b = banner("cwisstable/base.h");
        assert_eq!(b.len(), BANNER_WIDTH);
        assert!(b.starts_with("/// cwisstable/base.h /"));
        assert!(b.ends_with("////"));
    }

    #[test]
    fn long_identity_banner_is_not_padded() {
        let identity = "x".repeat(90);
        assert_eq!(banner(&identity), format!("/// {identity} /"));
    }

    #[test]
    fn assembles_the_full_layout() {
        let graph = chain();
        let seq = Sequence::of(&graph).unwrap();
        let options = AssembleOptions {
            license: License::from_plain_text("License line"),
            ..AssembleOptions::default()
        };
        let text = assemble(&seq, &options);

        let expected = format!(
            "// License line\n\
             \n\
             // THIS IS A GENERATED FILE! DO NOT EDIT DIRECTLY!\n\
             // Generated using agglomerate, by concatenating, in order:\n\
             // #include \"base.h\"\n\
             // #include \"mid.h\"\n\
             // #include \"top.h\"\n\
             \n\
             #ifndef CWISSTABLE_H_\n\
             #define CWISSTABLE_H_\n\
             \n\
             #include <stddef.h>\n\
             #include <stdint.h>\n\
             \n\
             {b}\nX\n{b}\n\n\
             {m}\nY\n{m}\n\n\
             {t}\nZ\n{t}\n\n\
             #endif  // CWISSTABLE_H_\n",
            b = banner("base.h"),
            m = banner("mid.h"),
            t = banner("top.h"),
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn only_the_caller_guard_survives() {
        let graph = chain();
        let seq = Sequence::of(&graph).unwrap();
        let options = AssembleOptions {
            guard: "MY_LIB_H_".into(),
            ..AssembleOptions::default()
        };
        let text = assemble(&seq, &options);
        assert_eq!(text.matches("#ifndef").count(), 1);
        assert_eq!(text.matches("#define").count(), 1);
        assert_eq!(text.matches("#endif").count(), 1);
        assert!(text.contains("#ifndef MY_LIB_H_\n#define MY_LIB_H_\n"));
        assert!(text.ends_with("#endif  // MY_LIB_H_\n"));
        for guard in ["BASE_H_", "MID_H_", "TOP_H_"] {
            assert!(!text.contains(guard));
        }
    }
}
