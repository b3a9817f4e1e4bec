use shared::AnalysisResult;
use shared::format::{
    ConfidenceBand, confidence_tier, format_confidence, format_timestamp, is_celebration,
};
use yew::prelude::*;

pub fn render_results(result: &AnalysisResult) -> Html {
    let percentage = (result.confidence * 100.0).clamp(0.0, 100.0);
    let band = ConfidenceBand::from_confidence(result.confidence);
    let tier = confidence_tier(result.confidence);

    html! {
        <div class={classes!("results-container", tier, is_celebration(result.confidence).then_some("celebrate"))}>
            <div class="result-header">
                <h2 title={format!("Analysis results for: {}", result.upload_id)}>
                    <i class="fa-solid fa-leaf"></i>{ format!(" {}", result.prediction) }
                </h2>
                <div class="confidence-meter">
                    <div class="meter-label">{"Confidence:"}</div>
                    <div class="meter">
                        <div class={classes!("meter-fill", tier)} style={format!("width: {}%", percentage)}></div>
                    </div>
                    <div class="meter-value">{ format_confidence(result.confidence) }</div>
                </div>
                <p class="confidence-band">{ band.description() }</p>
            </div>
            <div class="detailed-results">
                <h3>{"Recommendation"}</h3>
                <p class="recommendation">{ &result.recommendation }</p>
                <p class="analysis-meta">
                    { format!("Upload {} analyzed at {}", result.upload_id, format_timestamp(&result.timestamp)) }
                </p>
            </div>
        </div>
    }
}
