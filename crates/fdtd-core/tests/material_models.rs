use fdtd_core::medium::{
    DrudeLorentzParameters, DrudeParameters, PermittivityError, PermittivityModel,
    TabulatedPermittivity,
};
use fdtd_core::spectrum::{LinearDiscreteCollection, OpticalSpectrum, SpectrumUnit, SpectrumUnitKind};
use num_complex::Complex64;

#[test]
fn unit_conversions_agree_across_a_visible_sweep() {
    let collection = LinearDiscreteCollection::new(300.0e-9, 700.0e-9, 41).expect("collection");
    let spectrum = OpticalSpectrum::from_collection(&collection, SpectrumUnitKind::Wavelength)
        .expect("spectrum");

    for unit in &spectrum {
        let frequency = unit.converted(SpectrumUnitKind::Frequency);
        let cycle = frequency.converted(SpectrumUnitKind::CycleFrequency);
        let back = cycle.to_kind(SpectrumUnitKind::Wavelength);
        assert!((back - unit.value()).abs() / unit.value() < 1.0e-12);
        assert_eq!(spectrum.position(unit), spectrum.units().iter().position(|u| u == unit));
    }
}

#[test]
fn tabulated_silver_stays_between_neighbouring_rows() {
    let table = TabulatedPermittivity::silver_sample();
    let wavelengths = table.wavelengths_nm().to_vec();

    for (index, pair) in wavelengths.windows(2).enumerate() {
        let low = table.permittivities()[index];
        let high = table.permittivities()[index + 1];
        for fraction in [0.1, 0.5, 0.9] {
            let wavelength_nm = pair[0] + fraction * (pair[1] - pair[0]);
            let eps = table.permittivity(&SpectrumUnit::wavelength(wavelength_nm * 1.0e-9));
            assert!(eps.re <= low.re.max(high.re) + 1.0e-12);
            assert!(eps.re >= low.re.min(high.re) - 1.0e-12);
            assert!(eps.im <= low.im.max(high.im) + 1.0e-12);
            assert!(eps.im >= low.im.min(high.im) - 1.0e-12);
        }
    }
}

#[test]
fn out_of_table_queries_clamp_to_last_row() {
    let table = TabulatedPermittivity::silver_sample();
    let last = *table.permittivities().last().expect("rows");

    for wavelength in [200.0e-9, 700.0e-9, 1_500.0e-9] {
        assert_eq!(table.permittivity(&SpectrumUnit::wavelength(wavelength)), last);
    }
}

#[test]
fn tabulated_and_analytic_silver_are_both_metallic() {
    let models: Vec<Box<dyn PermittivityModel>> = vec![
        Box::new(TabulatedPermittivity::silver_sample()),
        Box::new(DrudeParameters::silver()),
        Box::new(DrudeLorentzParameters::silver()),
    ];

    for wavelength in [400.0e-9, 500.0e-9, 600.0e-9] {
        let unit = SpectrumUnit::wavelength(wavelength);
        for model in &models {
            let eps = model.permittivity(&unit);
            assert!(eps.re < 0.0, "eps({unit}) = {eps}");
            assert!(eps.im > 0.0, "eps({unit}) = {eps}");
            let index = model.refractive_index(&unit);
            assert!((index * index - eps).norm() < 1.0e-9 * eps.norm());
        }
    }
}

#[test]
fn mismatched_table_is_rejected() {
    let error = TabulatedPermittivity::new(
        vec![400.0, 500.0],
        vec![Complex64::new(1.0, 0.0)],
    )
    .expect_err("lengths differ");
    assert_eq!(
        error,
        PermittivityError::LengthMismatch {
            wavelengths: 2,
            permittivities: 1,
        }
    );
}
