//! One pass over every adapter for a digest run.

use wellness_core::DateRange;

use crate::client::WellnessSources;
use crate::types::SourceOutputs;

impl WellnessSources {
    /// Call each adapter once, in fixed order: trends, social posts, forum
    /// posts, papers.
    ///
    /// Never fails; adapters that error contribute their fallback text.
    pub async fn collect(&self, range: &DateRange, topic: &str) -> SourceOutputs {
        let input = range.to_tool_input();

        tracing::info!(period = %range.describe(), "collecting wellness trends");
        let trends = self.popular_wellness_trends(&input).await;

        tracing::info!("collecting social posts");
        let social_posts = self.social_buzz_posts(&input).await;

        tracing::info!("collecting forum discussions");
        let forum_posts = self.reddit_wellness_discussions(&input).await;

        tracing::info!(topic, "collecting research papers");
        let papers = self
            .research_papers(&range.to_tool_input_with_topic(topic))
            .await;

        SourceOutputs {
            trends,
            social_posts,
            forum_posts,
            papers,
        }
    }
}
