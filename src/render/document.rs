//! Final document assembly around the compiled body.

use crate::log::info;
use crate::options::Options;

use super::color::color_definitions;
use super::context::CompileState;

/// Prefix every line with the TeX comment character.
fn tex_comment(comment: &str) -> String {
    format!("% {}\n", comment.replace('\n', "\n% "))
}

/// Escape `%` signs that would otherwise start a TeX comment.
///
/// Comment lines and the `%` ending a line (as in `table {%`) are kept.
pub fn escape_pct(code: &str) -> String {
    code.split('\n')
        .map(escape_pct_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn escape_pct_line(line: &str) -> String {
    if line.trim_start().starts_with('%') {
        return line.to_string();
    }
    let end = line.trim_end().len();
    let mut out = String::with_capacity(line.len() + 4);
    let mut prev = None;
    for (i, c) in line.char_indices() {
        if c == '%' && prev != Some('\\') && i + 1 != end {
            out.push('\\');
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

/// Wrap the flattened body into the finished document.
pub fn assemble(ctx: &mut CompileState, options: &Options, mut body: Vec<String>) -> String {
    if ctx.is_in_groupplot_env {
        // Not every slot of the grid was used
        body.push(format!("{}\n\n", ctx.flavor.end("groupplot")));
        ctx.is_in_groupplot_env = false;
    }

    let mut code = String::new();
    if options.include_disclaimer {
        code.push_str(&tex_comment(&format!(
            "This file was created with plot2tikz v{}.",
            env!("CARGO_PKG_VERSION")
        )));
    }

    let wrap = options.wrap && options.add_axis_environment;
    if wrap {
        code.push_str(&ctx.flavor.start("tikzpicture"));
        if !options.extra_tikzpicture_parameters.is_empty() {
            code.push_str(&format!(
                "[\n{}\n]",
                options.extra_tikzpicture_parameters.join(",\n")
            ));
        }
        code.push('\n');
        if !options.extra_lines_start.is_empty() {
            code.push_str(&options.extra_lines_start.join("\n"));
            code.push('\n');
        }
        code.push('\n');
    }

    let definitions = color_definitions(ctx);
    if !definitions.is_empty() {
        code.push_str(&definitions.join("\n"));
        code.push_str("\n\n");
    }

    code.push_str(&body.concat());

    if wrap {
        code.push_str(&ctx.flavor.end("tikzpicture"));
        code.push('\n');
    }

    let (pgfplots_libs, tikz_libs) = ctx.libraries();
    if ctx.show_info {
        info!(pgfplots = ?pgfplots_libs, tikz = ?tikz_libs, "required libraries");
    }
    if options.standalone {
        code = ctx.flavor.standalone(&code, &pgfplots_libs, &tikz_libs);
    }

    if options.escape_pct_latex {
        code = escape_pct(&code);
    }
    code
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::Figure;
    use crate::render::color::color_name;
    use crate::types::Rgba;

    fn state(options: &Options) -> CompileState {
        CompileState::new(options, &Figure::default()).unwrap()
    }

    #[test]
    fn wrapped_body_with_color_definitions() {
        let options = Options::new().with_filepath("x.tex").with_disclaimer(false);
        let mut ctx = state(&options);
        color_name(&mut ctx, Rgba::rgb(0.5, 0.5, 0.0));
        let code = assemble(&mut ctx, &options, vec!["BODY\n".into()]);
        insta::assert_snapshot!(code, @r"
        \begin{tikzpicture}

        \definecolor{olive1281280}{rgb}{0.5,0.5,0}

        BODY
        \end{tikzpicture}
        ");
    }

    #[test]
    fn dangling_groupplot_is_closed() {
        let options = Options::new().with_filepath("x.tex");
        let mut ctx = state(&options);
        ctx.is_in_groupplot_env = true;
        let code = assemble(&mut ctx, &options, vec!["\\nextgroupplot\n".into()]);
        assert!(code.starts_with("% This file was created with plot2tikz v"));
        assert!(code.contains("\\nextgroupplot\n\\end{groupplot}\n\n\\end{tikzpicture}\n"));
        assert!(!ctx.is_in_groupplot_env);
    }

    #[test]
    fn extra_parameters_and_lines() {
        let mut options = Options::new().with_filepath("x.tex").with_disclaimer(false);
        options.extra_tikzpicture_parameters = vec!["scale=2".into(), "trim axis left".into()];
        options.extra_lines_start = vec!["\\footnotesize".into()];
        let mut ctx = state(&options);
        let code = assemble(&mut ctx, &options, Vec::new());
        assert_eq!(
            code,
            "\\begin{tikzpicture}[\nscale=2,\ntrim axis left\n]\n\\footnotesize\n\n\\end{tikzpicture}\n"
        );
    }

    #[test]
    fn no_wrapping_without_axis_environment() {
        let mut options = Options::new().with_filepath("x.tex").with_disclaimer(false);
        options.add_axis_environment = false;
        let mut ctx = state(&options);
        assert_eq!(assemble(&mut ctx, &options, vec!["X".into()]), "X");
    }

    #[test]
    fn standalone_context_document() {
        let options = Options::new()
            .with_filepath("x.tex")
            .with_disclaimer(false)
            .with_flavor("context")
            .with_standalone(true);
        let mut ctx = state(&options);
        ctx.add_pgfplots_lib("groupplots");
        let code = assemble(&mut ctx, &options, Vec::new());
        assert!(code.starts_with("\\setupcolors[state=start]\n"));
        assert!(code.contains("\\usepgfplotslibrary[groupplots]"));
        assert!(code.contains("\\starttikzpicture\n\n\\stoptikzpicture\n"));
        assert!(code.ends_with("\\stopTEXpage\n"));
    }

    #[test]
    fn percent_escaping_spares_comments_and_table_openers() {
        let code = "% comment 5%\ntable {%\nrate 50% \\% done\n";
        assert_eq!(
            escape_pct(code),
            "% comment 5%\ntable {%\nrate 50\\% \\% done\n"
        );
    }
}
