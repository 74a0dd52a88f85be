//! Integration tests for the decision wizard.
//!
//! These tests verify the end-to-end flow:
//! 1. Criteria setup and matrix editing through the wizard session
//! 2. Weight calculation through the solver port
//! 3. Alternative scoring and final ranking
//! 4. Tabular import/export round trips
//!
//! Uses the mock solver to test the flow without a running service.

use std::io::Write as _;
use std::sync::Arc;

use tradeoff_engine::adapters::export::matrix_sheet;
use tradeoff_engine::adapters::import::{import_matrix_file, ImportError};
use tradeoff_engine::adapters::solver::MockSolver;
use tradeoff_engine::application::handlers::CalculateWeightsHandler;
use tradeoff_engine::application::{Stage, WizardSession};
use tradeoff_engine::ports::{MatrixPayload, SolverError, WeightResponse};

fn weights(crisp: Vec<f64>) -> WeightResponse {
    WeightResponse {
        crisp_weights: crisp,
        lower_weights: None,
        upper_weights: None,
        sorted_criteria: None,
        lambda_max: None,
        ci: 0.0,
        cr: 0.0,
        inconsistency_ratios: None,
    }
}

#[tokio::test]
async fn ahp_flow_from_criteria_to_ranking() {
    tradeoff_engine::config::init_tracing();

    let mut session = WizardSession::ahp();

    session.set_criterion_count(2).unwrap();
    session.rename_criterion(0, "Cost").unwrap();
    session.rename_criterion(1, "Quality").unwrap();
    session.confirm_criteria().unwrap();
    assert_eq!(session.stage(), Stage::Ready);

    // One upper-triangle edit fills the reciprocal automatically.
    session.set_crisp_cell(0, 1, 2.0).unwrap();

    let solver = Arc::new(MockSolver::returning(weights(vec![0.6, 0.4])));
    let handler = CalculateWeightsHandler::new(solver.clone());
    let response = handler.handle(&mut session).await.unwrap();
    assert_eq!(response.crisp_weights, vec![0.6, 0.4]);
    assert_eq!(solver.ahp_calls(), 1);

    session.set_alternative_count(2).unwrap();
    session.rename_alternative(0, "Vendor A").unwrap();
    session.rename_alternative(1, "Vendor B").unwrap();
    session.confirm_alternatives().unwrap();

    // Vendor A dominates on Cost; Quality is a tie.
    session.set_alternative_cell(0, 0, 1, 2.0).unwrap();
    session.set_alternative_cell(0, 1, 0, 0.5).unwrap();

    let ranking = session.synthesize().unwrap();
    assert_eq!(ranking[0].index, 0);
    assert_eq!(ranking[0].rank, 1);
    assert!((ranking[0].score - 0.6).abs() < 1e-9);
    assert!((ranking[1].score - 0.4).abs() < 1e-9);
}

#[tokio::test]
async fn bwm_flow_routes_to_the_bwm_endpoint() {
    let mut session = WizardSession::bwm(tradeoff_engine::ports::SolverVariant::Linear);

    session.set_criterion_count(3).unwrap();
    session.confirm_criteria().unwrap();
    session.set_best("Criterion 1").unwrap();
    session.set_worst("Criterion 3").unwrap();

    let solver = Arc::new(MockSolver::returning(weights(vec![0.5, 0.3, 0.2])));
    let handler = CalculateWeightsHandler::new(solver.clone());
    handler.handle(&mut session).await.unwrap();

    assert_eq!(solver.bwm_calls(), 1);
    assert_eq!(solver.ahp_calls(), 0);
    assert!(session.weights().is_some());
}

#[tokio::test]
async fn solver_failure_leaves_previous_weights_in_place() {
    let mut session = WizardSession::ahp();
    session.set_criterion_count(2).unwrap();
    session.confirm_criteria().unwrap();

    let good = Arc::new(MockSolver::returning(weights(vec![0.7, 0.3])));
    CalculateWeightsHandler::new(good).handle(&mut session).await.unwrap();

    let bad = Arc::new(MockSolver::failing(SolverError::Network("connection refused".into())));
    let result = CalculateWeightsHandler::new(bad).handle(&mut session).await;

    assert!(result.is_err());
    assert_eq!(session.weights().unwrap().crisp_weights, vec![0.7, 0.3]);
}

#[test]
fn csv_import_feeds_the_session() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    write!(
        file,
        "Criteria,Cost,Quality,Speed\nCost,1,2,4\nQuality,0.5,1,2\nSpeed,0.25,0.5,1\n"
    )
    .unwrap();

    let imported = import_matrix_file(file.path()).unwrap();
    assert_eq!(imported.criteria, vec!["Cost", "Quality", "Speed"]);

    let mut session = WizardSession::ahp();
    let report = session.validate_import(&imported.criteria, &imported.matrix);
    assert!(report.ok, "unexpected errors: {:?}", report.errors);

    session.adopt_import(imported.criteria, imported.matrix).unwrap();
    assert_eq!(session.stage(), Stage::Ready);
    assert_eq!(session.criteria(), ["Cost", "Quality", "Speed"]);

    let request = session.ahp_request().unwrap();
    match request.matrix {
        MatrixPayload::Crisp(values) => assert_eq!(values[0], vec![1.0, 2.0, 4.0]),
        other => panic!("expected a crisp payload, got {other:?}"),
    }
}

#[test]
fn inconsistent_import_is_reported_not_adopted() {
    let criteria = vec!["A".to_string(), "B".to_string()];
    // a[0][1] * a[1][0] = 6, not 1.
    let values = vec![vec![1.0, 2.0], vec![3.0, 1.0]];

    let mut session = WizardSession::ahp();
    let report = session.validate_import(&criteria, &values);
    assert!(!report.ok);
    assert!(report.errors[0].starts_with("Reciprocity violated"));

    assert!(session.adopt_import(criteria, values).is_err());
    assert!(session.matrix().is_none());
}

#[test]
fn export_then_import_round_trips_within_tolerance() {
    let criteria: Vec<String> = ["Cost", "Quality", "Speed"].iter().map(|s| s.to_string()).collect();
    let matrix = vec![
        vec![1.0, 1.0 / 3.0, 5.0],
        vec![3.0, 1.0, 7.0],
        vec![0.2, 1.0 / 7.0, 1.0],
    ];

    let csv = matrix_sheet(&criteria, &matrix).to_csv();
    let reimported = tradeoff_engine::adapters::import::parse_table(&csv).unwrap();

    assert_eq!(reimported.criteria, criteria);
    for (row, back) in matrix.iter().zip(&reimported.matrix) {
        for (a, b) in row.iter().zip(back) {
            assert!((a - b).abs() < 1e-6, "{a} vs {b}");
        }
    }
}

#[test]
fn unsupported_extension_is_a_clear_error() {
    let file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
    let err = import_matrix_file(file.path()).unwrap_err();
    assert!(matches!(err, ImportError::UnsupportedFileType));
    assert_eq!(err.to_string(), "Unsupported file type. Please upload .csv");
}
