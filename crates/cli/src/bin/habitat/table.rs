use habitat_calculator::design::Habitat;

const HEADER: [&str; 10] = [
    "power_W",
    "shape",
    "people",
    "radius_m",
    "rpm",
    "floors",
    "cooling_kg",
    "structure_kg",
    "total_kg",
    "status",
];

/// Print one aligned row per habitat, then any feasibility reports.
pub fn print(habitats: &[Habitat]) {
    let rows: Vec<[String; 10]> = habitats.iter().map(row).collect();
    let mut widths = HEADER.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    println!("{}", join(&HEADER.map(String::from), &widths));
    for row in &rows {
        println!("{}", join(row, &widths));
    }

    for habitat in habitats {
        let reports = [&habitat.lighting.report, &habitat.cooling.cooling_report];
        for report in reports.into_iter().flatten() {
            println!("{:.3e} W: {report}", habitat.power_w);
        }
    }
}

fn row(habitat: &Habitat) -> [String; 10] {
    let status = match (habitat.is_cooling_possible(), habitat.is_complete_lighting()) {
        (true, true) => "ok",
        (true, false) => "electric-light",
        (false, _) => "no-cooling",
    };
    [
        format!("{:.3e}", habitat.power_w),
        habitat.shape.geometry.family().name().to_string(),
        format!("{:.0}", habitat.population),
        format!("{:.1}", habitat.shape.rotational_radius_m),
        format!("{:.3}", habitat.gravity.rotation_rate_rpm),
        habitat.gravity.floor_count().to_string(),
        format!("{:.3e}", habitat.total_cooling_mass_kg),
        format!("{:.3e}", habitat.structure.total_structural_mass_kg),
        format!("{:.3e}", habitat.total_mass_kg),
        status.to_string(),
    ]
}

fn join(cells: &[String; 10], widths: &[usize; 10]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:>width$}"))
        .collect::<Vec<_>>()
        .join("  ")
}
