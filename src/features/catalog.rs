//! Static field tables for the three forms.
//!
//! Field order, bounds and defaults mirror the data the classifiers were fitted
//! on. Positions are spelled out explicitly so a reordering of the table cannot
//! silently reorder model input.

use super::domain::{DiseaseKind, DomainSpec, FieldKind, FieldSpec};

const fn int(
    position: usize,
    name: &'static str,
    label: &'static str,
    help: Option<&'static str>,
    min: f64,
    max: f64,
    default: f64,
) -> FieldSpec {
    FieldSpec {
        name,
        label,
        help,
        kind: FieldKind::Integer,
        min,
        max,
        default,
        position,
    }
}

const fn real(
    position: usize,
    name: &'static str,
    label: &'static str,
    help: Option<&'static str>,
    min: f64,
    max: f64,
    default: f64,
) -> FieldSpec {
    FieldSpec {
        name,
        label,
        help,
        kind: FieldKind::Real,
        min,
        max,
        default,
        position,
    }
}

static DIABETES_FIELDS: [FieldSpec; 8] = [
    int(0, "Pregnancies", "Number of Pregnancies", Some("Number of times pregnant"), 0.0, 17.0, 1.0),
    int(
        1,
        "Glucose",
        "Glucose Level (mg/dL)",
        Some("Plasma glucose concentration 2 hours into an oral glucose tolerance test"),
        0.0,
        200.0,
        120.0,
    ),
    int(2, "BloodPressure", "Blood Pressure (mmHg)", Some("Diastolic blood pressure"), 0.0, 122.0, 70.0),
    int(3, "SkinThickness", "Skin Thickness (mm)", Some("Triceps skin fold thickness"), 0.0, 99.0, 20.0),
    int(4, "Insulin", "Insulin Level (mu U/ml)", Some("2-Hour serum insulin"), 0.0, 846.0, 79.0),
    real(5, "BMI", "BMI (kg/m²)", Some("Body Mass Index"), 0.0, 67.1, 25.0),
    real(
        6,
        "DiabetesPedigreeFunction",
        "Diabetes Pedigree Function",
        Some("Scores likelihood of diabetes based on family history"),
        0.078,
        2.42,
        0.372,
    ),
    int(7, "Age", "Age of the Person (years)", None, 1.0, 120.0, 30.0),
];

static HEART_FIELDS: [FieldSpec; 13] = [
    int(0, "age", "Age", None, 1.0, 120.0, 50.0),
    int(1, "sex", "Sex (0 = Female, 1 = Male)", Some("0: Female, 1: Male"), 0.0, 1.0, 1.0),
    int(
        2,
        "cp",
        "Chest Pain Type (0-3)",
        Some("0: Typical angina, 1: Atypical angina, 2: Non-anginal pain, 3: Asymptomatic"),
        0.0,
        3.0,
        0.0,
    ),
    int(3, "trestbps", "Resting Blood Pressure (mmHg)", None, 90.0, 200.0, 120.0),
    int(4, "chol", "Serum Cholestoral (mg/dl)", None, 100.0, 600.0, 200.0),
    int(
        5,
        "fbs",
        "Fasting Blood Sugar > 120 mg/dl (0 = No, 1 = Yes)",
        Some("1 if FBS > 120 mg/dl, 0 otherwise"),
        0.0,
        1.0,
        0.0,
    ),
    int(
        6,
        "restecg",
        "Resting Electrocardiographic Results (0-2)",
        Some("0: Normal, 1: ST-T wave abnormality, 2: Left ventricular hypertrophy"),
        0.0,
        2.0,
        0.0,
    ),
    int(7, "thalach", "Maximum Heart Rate Achieved", None, 60.0, 220.0, 150.0),
    int(8, "exang", "Exercise Induced Angina (0 = No, 1 = Yes)", Some("1: Yes, 0: No"), 0.0, 1.0, 0.0),
    real(9, "oldpeak", "ST Depression Induced by Exercise", None, 0.0, 6.2, 1.0),
    int(
        10,
        "slope",
        "Slope of the Peak Exercise ST Segment (0-2)",
        Some("0: Upsloping, 1: Flat, 2: Downsloping"),
        0.0,
        2.0,
        1.0,
    ),
    int(
        11,
        "ca",
        "Major Vessels Colored by Flourosopy (0-4)",
        Some("Number of major vessels (0-3) colored by flourosopy, 4: unknown"),
        0.0,
        4.0,
        0.0,
    ),
    int(
        12,
        "thal",
        "Thalassemia (0-2)",
        Some("0: Normal, 1: Fixed defect, 2: Reversable defect"),
        0.0,
        2.0,
        1.0,
    ),
];

static PARKINSONS_FIELDS: [FieldSpec; 22] = [
    real(0, "MDVP:Fo(Hz)", "Average vocal fundamental frequency", None, 50.0, 250.0, 150.0),
    real(1, "MDVP:Fhi(Hz)", "Maximum vocal fundamental frequency", None, 50.0, 350.0, 200.0),
    real(2, "MDVP:Flo(Hz)", "Minimum vocal fundamental frequency", None, 50.0, 250.0, 100.0),
    real(3, "MDVP:Jitter(%)", "Jitter (percent)", None, 0.0, 0.0120, 0.0050),
    real(4, "MDVP:Jitter(Abs)", "Jitter (absolute)", None, 0.0, 0.00012, 0.00005),
    real(5, "MDVP:RAP", "Relative Amplitude Perturbation", None, 0.0, 0.0070, 0.0025),
    real(6, "MDVP:PPQ", "Five-point Period Perturbation Quotient", None, 0.0, 0.0070, 0.0025),
    real(
        7,
        "Jitter:DDP",
        "Average absolute difference of differences of periods",
        None,
        0.0,
        0.0210,
        0.0075,
    ),
    real(8, "MDVP:Shimmer", "Shimmer", None, 0.0, 0.0900, 0.0400),
    real(9, "MDVP:Shimmer(dB)", "Shimmer (dB)", None, 0.0, 1.5, 0.5),
    real(10, "Shimmer:APQ3", "Three-point Amplitude Perturbation Quotient", None, 0.0, 0.0500, 0.0200),
    real(11, "Shimmer:APQ5", "Five-point Amplitude Perturbation Quotient", None, 0.0, 0.0700, 0.0300),
    real(12, "MDVP:APQ", "Amplitude Perturbation Quotient", None, 0.0, 0.1500, 0.0400),
    real(
        13,
        "Shimmer:DDA",
        "Average absolute differences between amplitudes of consecutive periods",
        None,
        0.0,
        0.1500,
        0.0600,
    ),
    real(14, "NHR", "Noise-to-Harmonics Ratio", None, 0.0, 0.5, 0.2),
    real(15, "HNR", "Harmonics-to-Noise Ratio", None, 0.0, 35.0, 20.0),
    real(16, "RPDE", "Recurrence Period Density Entropy", None, 0.0, 0.8, 0.5),
    real(17, "DFA", "Detrended Fluctuation Analysis", None, 0.0, 1.0, 0.6),
    real(18, "spread1", "Nonlinear dynamical complexity measure 1", None, -8.0, -2.0, -4.0),
    real(19, "spread2", "Nonlinear dynamical complexity measure 2", None, 0.0, 0.5, 0.2),
    real(20, "D2", "Nonlinear dynamical complexity measure 3", None, 1.0, 4.0, 2.0),
    real(21, "PPE", "Pitch Period Entropy", None, 0.0, 0.7, 0.2),
];

static DIABETES: DomainSpec = DomainSpec {
    kind: DiseaseKind::Diabetes,
    title: "Diabetes Prediction",
    subtitle: "Enter the patient's details to predict diabetes risk.",
    positive_label: "The person is predicted to be Diabetic",
    negative_label: "The person is predicted to be Non-Diabetic",
    fields: &DIABETES_FIELDS,
};

static HEART_DISEASE: DomainSpec = DomainSpec {
    kind: DiseaseKind::HeartDisease,
    title: "Heart Disease Prediction",
    subtitle: "Input patient's cardiovascular parameters.",
    positive_label: "The person is predicted to have Heart Disease",
    negative_label: "The person is predicted to be Healthy (No Heart Disease)",
    fields: &HEART_FIELDS,
};

static PARKINSONS: DomainSpec = DomainSpec {
    kind: DiseaseKind::Parkinsons,
    title: "Parkinsons Prediction",
    subtitle: "Provide voice feature data to assess Parkinson's risk.",
    positive_label: "The person is predicted to have Parkinson's Disease",
    negative_label: "The person is predicted to be Healthy (No Parkinson's Disease)",
    fields: &PARKINSONS_FIELDS,
};

/// Shown alongside every prediction.
pub const DISCLAIMER: &str = "This application is for informational and educational purposes only \
and is not intended to be a substitute for professional medical advice, diagnosis, or treatment. \
Always seek the advice of your physician or other qualified health provider with any questions you \
may have regarding a medical condition.";

pub fn spec(kind: DiseaseKind) -> &'static DomainSpec {
    match kind {
        DiseaseKind::Diabetes => &DIABETES,
        DiseaseKind::HeartDisease => &HEART_DISEASE,
        DiseaseKind::Parkinsons => &PARKINSONS,
    }
}
