//! End-to-end tests over the public library surface

use nutrition_calc_core::{
    body_mass_index, brocca, calories_with_thermic_effect, classify_bmi, healthy_weight_range,
    krumdieck_calories, lorentz, BiologicalSex, BmiDiagnosis, CalcError, Calculator,
    CalorieCalculator, CalorieFormula, Height, IdealWeightCalculator, IdealWeightFormula,
    NutritionalAssessment, Person,
};
use serde_json::json;

fn kevin() -> Person {
    Person::new("kevin asael", BiologicalSex::Male, 75.0, 170.0, 22).unwrap()
}

#[test]
fn test_bmi_is_unit_invariant() {
    assert_eq!(body_mass_index(75.0, 170.0), body_mass_index(75.0, 1.70));
    assert_eq!(
        body_mass_index(75.0, Height::cm(170.0)),
        body_mass_index(75.0, Height::meters(1.70))
    );
}

#[test]
fn test_published_values() {
    assert_eq!(calories_with_thermic_effect(1000.0, true), 1100.0);
    assert_eq!(calories_with_thermic_effect(1000.0, false), 1000.0);
    assert_eq!(brocca(170.0), 70.0);
    assert_eq!(brocca(1.70), 70.0);
    assert_eq!(lorentz(BiologicalSex::Male, 170.0, 22), 65.5);
    assert_eq!(
        healthy_weight_range(170.0),
        "peso minimo=53.47kg - maximo=72.22kg"
    );
    assert_eq!(krumdieck_calories(75.0, 170.0), 2318.0);
}

#[test]
fn test_bmi_diagnosis_outcomes() {
    assert_eq!(classify_bmi(17.0), BmiDiagnosis::Underweight);
    assert_eq!(classify_bmi(22.0), BmiDiagnosis::NormalWeight);
    assert_eq!(classify_bmi(27.0), BmiDiagnosis::Overweight);
    assert_eq!(classify_bmi(32.0), BmiDiagnosis::Obesity);
    assert_eq!(classify_bmi(40.0), BmiDiagnosis::Unclassified);
}

#[test]
fn test_person_construction_failures() {
    let err = Person::new("kevi", BiologicalSex::Male, 75.0, 170.0, 22).unwrap_err();
    assert!(matches!(err, CalcError::InvalidArgument { .. }));

    assert!(Person::new("kevin", BiologicalSex::Male, -5.0, 170.0, 22).is_err());

    let boolean_weight = json!({
        "name": "kevin asael",
        "sex": "hombre",
        "weight": true,
        "height": 170,
        "age": 22
    });
    let err = Person::try_from(&boolean_weight).unwrap_err();
    assert_eq!(err.field(), Some("weight"));
}

#[test]
fn test_calorie_calculator_is_deterministic() {
    for formula in CalorieFormula::ALL {
        let calculator = CalorieCalculator::new(kevin(), formula, true);
        assert_eq!(calculator.compute(), calculator.compute());
    }
}

#[test]
fn test_calorie_calculator_from_person_attributes() {
    let person = Person::try_from(&json!({
        "name": "kevin asael",
        "sex": "HOMBRE",
        "weight": 75,
        "height": 1.70,
        "age": 22
    }))
    .unwrap();

    let message = CalorieCalculator::from_raw(person, &json!("harris"), &json!(true))
        .unwrap()
        .compute()
        .unwrap();
    assert_eq!(
        message,
        "De acuerdo a la fórmula de harris estimado kevin asael, las kcal que necesitas son: 1979.13"
    );
}

#[test]
fn test_ideal_weight_key_set_mismatch() {
    let attributes = json!({"sex": "hombre", "height": 1.70, "age": 22, "extra": 1});
    let err = IdealWeightCalculator::from_raw(&attributes, &json!("lorentz")).unwrap_err();
    assert_eq!(err.field(), Some("attributes"));
}

#[test]
fn test_ideal_weight_person_and_map_agree() {
    let attributes = json!({"sex": "hombre", "height": 1.70, "age": 22});
    for formula in IdealWeightFormula::ALL {
        let from_map = IdealWeightCalculator::from_raw(&attributes, &json!(formula.as_str()))
            .unwrap()
            .compute()
            .unwrap();
        let from_person = IdealWeightCalculator::new(kevin(), formula).compute().unwrap();
        assert!((from_map - from_person).abs() < 1e-9, "{}", formula);
    }
}

#[test]
fn test_assessment_session() {
    let session = NutritionalAssessment::new("Kevin").unwrap();
    assert_eq!(session.diagnose(75.0, 170.0), Ok(BmiDiagnosis::Overweight));
    assert!(NutritionalAssessment::new("User").is_err());
}
