use plot2tikz::{Axes, AxesId, Figure, Legend, Line2D, Options, TargetResolution};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::io::stderr)
        .init();

    let xs: Vec<f64> = (0..=2000).map(|i| i as f64 * 0.01).collect();
    let sine: Vec<f64> = xs.iter().map(|x| x.sin()).collect();
    let cosine: Vec<f64> = xs.iter().map(|x| x.cos()).collect();

    let mut axes = Axes::new(AxesId(0)).with_limits((0.0, 10.0), (-1.1, 1.1));
    axes.title = "Trigonometry".into();
    axes.xaxis.label = "$x$".into();
    axes.push(Line2D::new(xs.clone(), sine).with_label("sin"));
    axes.push(Line2D::new(xs, cosine).with_color("C1").with_label("cos"));
    axes.push(Legend::for_labels(["sin", "cos"]));

    let mut figure = Figure::with_axes(axes);
    if let Err(e) = plot2tikz::clean_figure(&mut figure, TargetResolution::Dpi(300.0), 1.0) {
        eprintln!("Error: {e}");
        return;
    }

    let options = Options::new().with_standalone(true);
    match std::env::args().nth(1) {
        Some(path) => {
            if let Err(e) = plot2tikz::save(&path, &figure, &options) {
                eprintln!("Error: {e}");
            }
        }
        None => match plot2tikz::get_tikz_code(&figure, &options) {
            Ok(code) => println!("{code}"),
            Err(e) => eprintln!("Error: {e}"),
        },
    }
}
