use tasklist_core::Stats;
use yew::{
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct StatsBarProps {
  pub stats: Stats
}

#[function_component(StatsBar)]
pub fn stats_bar(
  props: &StatsBarProps
) -> Html {
  let stats = props.stats;
  html! {
      <div class="stats">
          <div class="stat">
              <span id="total-tasks" class="stat-value">{ stats.total.to_string() }</span>
              <span class="stat-label">{ "Total" }</span>
          </div>
          <div class="stat">
              <span id="completed-tasks" class="stat-value">{ stats.completed.to_string() }</span>
              <span class="stat-label">{ "Completed" }</span>
          </div>
          <div class="stat">
              <span id="pending-tasks" class="stat-value">{ stats.pending.to_string() }</span>
              <span class="stat-label">{ "Pending" }</span>
          </div>
      </div>
  }
}
