use chrono::NaiveDate;
use std::io::Write;
use tempfile::NamedTempFile;

use glp_dashboard::{compute_views, filter, load, FilterOptions, Record, Selection, Table};

const HEADER: &str = "Regiao - Sigla;Estado - Sigla;Municipio;Revenda;CNPJ da Revenda;Nome da Rua;Numero Rua;Complemento;Bairro;Cep;Produto;Data da Coleta;Valor de Venda;Valor de Compra;Unidade de Medida;Bandeira";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn rec(region: &str, brand: &str, d: NaiveDate, price: f64) -> Record {
    Record {
        region: region.into(),
        state: "SP".into(),
        municipality: "CAMPINAS".into(),
        reseller: "POSTO".into(),
        product: "GLP".into(),
        collection_date: Some(d),
        sale_price: price,
        purchase_price: None,
        brand: brand.into(),
    }
}

fn fixture() -> Table {
    Table::new(vec![
        rec("SE", "X", date(2025, 1, 1), 10.0),
        rec("SE", "Y", date(2025, 1, 2), 20.0),
        rec("S", "X", date(2025, 1, 1), 30.0),
    ])
}

fn survey_csv() -> NamedTempFile {
    let rows = [
        "SE;SP;SAO PAULO;POSTO A;1;RUA A;10;;CENTRO;01000-000;GLP;02/01/2025;110,00;;R$ / 13 kg;ULTRAGAZ",
        "SE;RJ;RIO DE JANEIRO;POSTO B;2;RUA B;20;;CENTRO;20000-000;GLP;02/01/2025;120,50;;R$ / 13 kg;LIQUIGAS",
        "S;RS;PORTO ALEGRE;POSTO C;3;RUA C;30;;CENTRO;90000-000;GLP;03/01/2025;1.050,00;;R$ / 13 kg;",
        "NE;BA;SALVADOR;POSTO D;4;RUA D;40;;CENTRO;40000-000;GLP;xx/01/2025;100,00;90,00;R$ / 13 kg;ULTRAGAZ",
        ";GO;GOIANIA;POSTO E;5;RUA E;50;;CENTRO;74000-000;GLP;04/01/2025;105,00;;R$ / 13 kg;COPAGAZ",
    ];
    let mut tmp = NamedTempFile::new().unwrap();
    write!(tmp, "\u{feff}{}\n{}\n", HEADER, rows.join("\n")).unwrap();
    tmp
}

#[test]
fn region_filter_then_brand_means() {
    let table = fixture();
    let sel = Selection::default().with_regions(["SE"]);
    let out = filter(&table, &sel);
    assert_eq!(out.records(), &table.records()[..2]);

    let views = compute_views(&table, &sel);
    let got: Vec<(&str, f64)> = views
        .brand_means
        .iter()
        .map(|r| (r.brand.as_str(), r.mean_price))
        .collect();
    assert_eq!(got, vec![("Y", 20.0), ("X", 10.0)]);
}

#[test]
fn no_filters_returns_the_whole_table() {
    let table = fixture();
    assert_eq!(filter(&table, &Selection::default()), table);
}

#[test]
fn date_range_outside_the_data_gives_empty_views() {
    let table = fixture();
    let sel = Selection::default().with_date_range(Some(date(2030, 1, 1)), Some(date(2030, 12, 31)));
    assert!(filter(&table, &sel).is_empty());

    let views = compute_views(&table, &sel);
    assert_eq!(views.row_count, 0);
    assert!(views.state_means.is_empty());
    assert!(views.date_region_means.is_empty());
    assert!(views.brand_means.is_empty());
    assert_eq!(views.histogram.iter().map(|b| b.count).sum::<usize>(), 0);
    assert!(views.brand_boxes.is_empty());
    assert!(views.brand_counts.is_empty());
}

#[test]
fn every_kept_row_satisfies_the_selection() {
    let table = fixture();
    let selections = [
        Selection::default().with_brands(["X"]),
        Selection::default().with_regions(["S", "SE"]).with_brands(["Y"]),
        Selection::default().with_date_range(Some(date(2025, 1, 1)), Some(date(2025, 1, 1))),
        Selection::default().with_regions(["N"]),
    ];
    for sel in &selections {
        let out = filter(&table, sel);
        assert!(out.len() <= table.len());
        assert!(out.records().iter().all(|r| sel.matches(r)));
        assert_eq!(filter(&out, sel), out);
        let views = compute_views(&table, sel);
        assert_eq!(
            views.histogram.iter().map(|b| b.count).sum::<usize>(),
            out.len()
        );
    }
}

#[test]
fn loads_a_survey_file_end_to_end() {
    let tmp = survey_csv();
    let table = load(tmp.path()).unwrap();
    assert_eq!(table.len(), 5);

    let prices: Vec<f64> = table.records().iter().map(|r| r.sale_price).collect();
    assert_eq!(prices, vec![110.0, 120.5, 1050.0, 100.0, 105.0]);
    assert_eq!(table.records()[3].collection_date, None);
    assert_eq!(table.records()[3].purchase_price, Some(90.0));

    let opts = FilterOptions::from_table(&table);
    assert_eq!(opts.regions, vec!["NE", "Não informada", "S", "SE"]);
    assert_eq!(opts.brands, vec!["COPAGAZ", "LIQUIGAS", "Não informada", "ULTRAGAZ"]);
    assert_eq!(opts.date_bounds, Some((date(2025, 1, 2), date(2025, 1, 4))));

    // The default selection spans the observed dates, so the undated row drops out.
    let views = compute_views(&table, &opts.default_selection());
    assert_eq!(views.row_count, 4);
    assert_eq!(views.state_means[0].state, "RS");
    assert_eq!(views.date_region_means.len(), 3);
    assert_eq!(views.brand_counts.iter().map(|c| c.count).sum::<usize>(), 4);

    // Without a date range it is still counted everywhere except the time series.
    let all = compute_views(&table, &Selection::default());
    assert_eq!(all.row_count, 5);
    assert_eq!(all.date_region_means.len(), 3);
    let ultragaz = all.brand_counts.iter().find(|c| c.brand == "ULTRAGAZ").unwrap();
    assert_eq!(ultragaz.count, 2);
}
