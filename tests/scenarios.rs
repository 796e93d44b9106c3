//! End-to-end conversions of small figures.

use chrono::NaiveDate;
use plot2tikz::{
    Artist, Axes, AxesId, Colormap, ContainerKind, Figure, GridStyle, Line2D, Options, Patch,
    PathCollection, ScalarMapping, Scale, XData, date2num, get_tikz_code,
};
use regex_lite::Regex;

fn options() -> Options {
    Options::new().with_filepath("figure.tex").with_disclaimer(false)
}

fn compile(figure: &Figure) -> String {
    get_tikz_code(figure, &options()).unwrap()
}

#[test]
fn simple_line() {
    let axes = Axes::new(AxesId(0)).with_child(Line2D::new(vec![0.0, 1.0], vec![0.0, 1.0]));
    let code = compile(&Figure::with_axes(axes));

    assert!(code.starts_with("\\begin{tikzpicture}\n\n"));
    assert!(code.contains("\\addplot [semithick, steelblue31119180]\ntable {%\n0 0\n1 1\n};\n"));
    let definition =
        Regex::new(r"\\definecolor\{steelblue31119180\}\{rgb\}\{0\.12\d*,0\.46\d*,0\.70\d*\}")
            .unwrap();
    let defined_at = definition.find(&code).expect("color definition").start();
    assert!(defined_at < code.find("\\begin{axis}").unwrap());
    assert!(code.ends_with("\\end{axis}\n\n\\end{tikzpicture}\n"));
}

#[test]
fn colormapped_scatter() {
    let scatter = PathCollection::scatter(&[0.0, 1.0], &[0.0, 1.0]).with_values(
        vec![0.0, 1.0],
        ScalarMapping::new(Colormap::viridis(), (0.0, 1.0)),
    );
    let axes = Axes::new(AxesId(0)).with_child(scatter);
    let code = compile(&Figure::with_axes(axes));

    assert!(code.contains("scatter src=explicit"));
    assert!(code.contains("colormap/viridis"));
    assert!(code.contains("x y colordata\n0 0 0\n1 1 1\n"), "{code}");
}

#[test]
fn bar_chart_with_three_series() {
    let mut axes = Axes::new(AxesId(0));
    for (series, (label, color)) in [("a", "r"), ("b", "g"), ("c", "b")].into_iter().enumerate() {
        let offset = series as f64 * 0.25;
        let bars = (0..2).map(|i| {
            Artist::from(Patch::bar(i as f64 + offset, 0.0, 0.25, 1.0 + i as f64, color))
        });
        axes.push_container(ContainerKind::Bar, label, bars);
    }
    let code = compile(&Figure::with_axes(axes));

    assert_eq!(code.matches(" rectangle (axis cs:").count(), 6);
    assert_eq!(code.matches("\\addlegendimage{ybar, ybar legend").count(), 3);
    for label in ["a", "b", "c"] {
        assert_eq!(code.matches(&format!("\\addlegendentry{{{label}}}")).count(), 1);
    }
}

#[test]
fn two_by_two_subplots() {
    let mut figure = Figure::subplots(2, 2);
    for (i, axes) in figure.axes_mut().enumerate() {
        axes.push(Line2D::new(vec![0.0, 1.0], vec![i as f64, 1.0]).with_color("k"));
    }
    let code = get_tikz_code(&figure, &options().with_standalone(true)).unwrap();

    assert_eq!(
        code.matches("\\begin{groupplot}[group style={group size=2 by 2}]")
            .count(),
        1
    );
    assert_eq!(code.matches("\\nextgroupplot").count(), 4);
    assert_eq!(code.matches("\\end{groupplot}").count(), 1);
    assert!(!code.contains("\\begin{axis}"));
    assert!(code.contains("\\usepgfplotslibrary{groupplots}\n"));
    let last_plot = code.rfind("\\addplot").unwrap();
    assert!(last_plot < code.find("\\end{groupplot}").unwrap());
}

#[test]
fn semilogy() {
    let mut axes = Axes::new(AxesId(0)).with_limits((0.0, 2.0), (1.0, 100.0));
    axes.yaxis.scale = Scale::Log { base: 10.0 };
    axes.push(Line2D::new(vec![0.0, 1.0, 2.0], vec![1.0, 10.0, 100.0]));
    let code = compile(&Figure::with_axes(axes));

    assert!(code.contains("ymode=log"));
    assert!(code.contains("log basis y={10}"));
    assert!(!code.contains("ytick={"));
}

#[test]
fn masked_line() {
    let mut line = Line2D::new(vec![0.0, 1.0, 2.0, 3.0], vec![0.0, 1.0, 4.0, 9.0]);
    line.ymask = Some(vec![false, false, true, false]);
    let code = compile(&Figure::with_axes(Axes::new(AxesId(0)).with_child(line)));

    assert!(code.contains("table {%\n0 0\n1 1\n2 nan\n3 9\n};"), "{code}");
    assert!(code.contains("unbounded coords=jump"));
}

#[test]
fn cleaning_drops_invisible_points() {
    let xs: Vec<f64> = (0..1000).map(|i| i as f64 / 100.0).collect();
    let axes = Axes::new(AxesId(0))
        .with_limits((0.0, 1.0), (0.0, 10.0))
        .with_child(Line2D::new(xs.clone(), xs).with_color("k"));
    let mut figure = Figure::with_axes(axes);
    let before = compile(&figure);
    plot2tikz::clean_figure(&mut figure, Default::default(), 1.0).unwrap();
    let after = compile(&figure);

    let row = Regex::new(r"^[\d.e+-]+ [\d.e+-]+$").unwrap();
    let rows = |code: &str| code.lines().filter(|l| row.is_match(l)).count();
    assert_eq!(rows(&before), 1000);
    assert!(rows(&after) < 10, "{after}");
}

#[test]
fn date_axis_keeps_its_minor_grid() {
    let d0 = NaiveDate::from_ymd_opt(2021, 5, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
    let d1 = NaiveDate::from_ymd_opt(2021, 5, 2).unwrap().and_hms_opt(0, 0, 0).unwrap();
    let mut line = Line2D::new(Vec::<f64>::new(), vec![1.0, 2.0]).with_color("k");
    line.xdata = XData::Dates(vec![d0, d1]);
    let mut axes = Axes::new(AxesId(0)).with_limits((date2num(&d0), date2num(&d1)), (0.0, 3.0));
    axes.xaxis.dates = true;
    axes.xaxis.minor_grid = Some(GridStyle::default());
    axes.push(line);
    let code = compile(&Figure::with_axes(axes));

    assert!(code.contains("xmin=2021-05-01 00:00, xmax=2021-05-02 00:00"), "{code}");
    assert!(code.contains("xminorgrids"), "{code}");
    assert_eq!(code.matches("xmin=").count(), 1, "{code}");
}

#[test]
fn hatched_bar_with_fixed_size_and_precision() {
    let bar = Patch::bar(1.0 / 3.0, 0.0, 0.5, 2.0, "r").with_hatch("/");
    let axes = Axes::new(AxesId(0)).with_limits((0.0, 1.0), (0.0, 2.0)).with_child(bar);
    let options = options()
        .with_standalone(true)
        .with_axis_size("8cm", "6cm")
        .with_float_format(".2f");
    let code = get_tikz_code(&Figure::with_axes(axes), &options).unwrap();

    assert!(code.contains("width=8cm"), "{code}");
    assert!(code.contains("height=6cm"), "{code}");
    assert!(code.contains("pattern=north east lines"), "{code}");
    assert!(code.contains("\\usetikzlibrary{patterns}"), "{code}");
    assert!(code.contains("(axis cs:0.33,0.00) rectangle (axis cs:0.83,2.00)"), "{code}");
}
