use crate::dashboard::{Dashboard, Draft};
use crate::models::Goal;
use chrono::{DateTime, NaiveDate, Utc};

/// The header shows the last clock tick; the form bounds use `now`.
pub fn render_index(dashboard: &Dashboard, now: DateTime<Utc>) -> String {
    let today = dashboard.local_date(now);
    INDEX_HTML
        .replace("{{HEADER_DATE}}", &escape_html(&dashboard.header_date()))
        .replace("{{DIALOG}}", &render_dialog(dashboard.draft(), dashboard.dialog_open(), today))
        .replace("{{GRID}}", &render_grid(dashboard.goals()))
}

/// One card per goal, in collection order.
pub fn render_grid(goals: &[Goal]) -> String {
    if goals.is_empty() {
        return r#"<p class="empty">No goals yet. Add one to get started.</p>"#.to_string();
    }

    let mut html = String::from(r#"<section class="grid">"#);
    for goal in goals {
        html.push_str(&render_card(goal));
    }
    html.push_str("</section>");
    html
}

pub fn render_card(goal: &Goal) -> String {
    let goal_id = escape_html(&goal.id);
    let progress = goal.progress.min(100);

    let mut rows = String::new();
    for task in &goal.tasks {
        let task_id = escape_html(&task.id);
        rows.push_str(&format!(
            r#"<form class="task{done}" method="post" action="/goals/{goal_id}/tasks/{task_id}/toggle">
            <input type="hidden" name="completed" value="{next}" />
            <input type="checkbox" id="task-{goal_id}-{task_id}"{checked} onchange="this.form.submit()" />
            <label for="task-{goal_id}-{task_id}">{text}</label>
          </form>"#,
            done = if task.completed { " done" } else { "" },
            next = !task.completed,
            checked = if task.completed { " checked" } else { "" },
            text = escape_html(&task.text),
        ));
    }

    format!(
        r#"<article class="card" id="goal-{goal_id}">
        <header class="card-head">
          <h3>{title}</h3>
          <span class="days">{days} days left</span>
          <form method="post" action="/goals/{goal_id}/delete">
            <button class="delete" type="submit" aria-label="Delete goal">&times;</button>
          </form>
        </header>
        <div class="progress-line"><span>Progress</span><span>{progress}%</span></div>
        <div class="bar"><div class="fill" style="width: {progress}%"></div></div>
        <div class="tasks-head"><h4>Daily Tasks</h4><span class="count">{completed}/{total}</span></div>
        <div class="tasks">
          {rows}
        </div>
      </article>"#,
        title = escape_html(&goal.title),
        days = goal.remaining_days,
        completed = goal.completed_count(),
        total = goal.tasks.len(),
    )
}

fn render_dialog(draft: &Draft, open: bool, today: NaiveDate) -> String {
    if !open {
        return r#"<form method="post" action="/dialog/open">
        <button class="primary" type="submit">+ Add New Goal</button>
      </form>"#
            .to_string();
    }

    let mut tasks = String::new();
    for task in &draft.tasks {
        tasks.push_str(&format!(
            r#"<li><span>{text}</span>
              <button type="submit" formaction="/draft/tasks/{id}/remove" aria-label="Remove task">&times;</button></li>"#,
            text = escape_html(&task.text),
            id = escape_html(&task.id),
        ));
    }

    let end_date = draft
        .end_date
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default();

    format!(
        r#"<div class="dialog" role="dialog" aria-labelledby="dialog-title">
        <form id="goal-form" method="post" action="/goals" data-tasks="{task_count}">
          <h2 id="dialog-title">Create New Goal</h2>
          <label for="title">Goal Title</label>
          <input id="title" name="title" value="{title}" placeholder="Enter goal title" />
          <label for="end_date">End Date</label>
          <input id="end_date" name="end_date" type="date" min="{min}" value="{end_date}" />
          <label for="task_text">Daily Tasks</label>
          <div class="task-input">
            <input id="task_text" name="task_text" value="{task_text}" placeholder="Enter task" />
            <button type="submit" formaction="/draft/tasks">Add</button>
          </div>
          <ul class="draft-tasks">{tasks}</ul>
          <button class="primary" id="create" type="submit"{disabled}>Create Goal</button>
        </form>
        <form method="post" action="/dialog/close"><button type="submit">Cancel</button></form>
      </div>"#,
        task_count = draft.tasks.len(),
        title = escape_html(&draft.title),
        min = today.format("%Y-%m-%d"),
        task_text = escape_html(&draft.task_text),
        disabled = if draft.is_submittable(today) { "" } else { " disabled" },
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Goal Tracking Dashboard</title>
  <style>
    :root {
      --bg: #121212;
      --card: #1e1e1e;
      --line: #2a2a2a;
      --muted: #9e9e9e;
      --ink: #f5f5f5;
      --accent: #7c4dff;
      --accent-dark: #6b42e0;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: system-ui, "Segoe UI", sans-serif;
    }

    .app {
      width: min(1200px, 100%);
      margin: 0 auto;
      padding: 32px 20px;
      display: grid;
      gap: 28px;
    }

    .top {
      display: flex;
      flex-wrap: wrap;
      justify-content: space-between;
      align-items: center;
      gap: 16px;
    }

    h1 {
      margin: 0;
      font-size: clamp(1.5rem, 3vw, 2rem);
    }

    .date {
      display: inline-block;
      margin-top: 8px;
      padding: 4px 12px;
      border-radius: 999px;
      background: var(--line);
      color: #d0d0d0;
      font-size: 0.85rem;
    }

    .subtitle {
      margin: 8px 0 0;
      color: var(--muted);
    }

    button {
      appearance: none;
      border: none;
      border-radius: 8px;
      padding: 10px 14px;
      font-weight: 600;
      cursor: pointer;
      background: var(--line);
      color: var(--ink);
    }

    button.primary {
      background: var(--accent);
    }

    button.primary:hover {
      background: var(--accent-dark);
    }

    button:disabled {
      opacity: 0.5;
      cursor: not-allowed;
    }

    .dialog {
      width: min(520px, 100%);
      background: var(--card);
      border: 1px solid var(--line);
      border-radius: 12px;
      padding: 20px;
      display: grid;
      gap: 10px;
    }

    .dialog form {
      display: grid;
      gap: 10px;
    }

    .dialog h2 {
      margin: 0 0 6px;
    }

    input {
      background: var(--line);
      border: 1px solid #3a3a3a;
      border-radius: 8px;
      color: var(--ink);
      padding: 10px;
    }

    .task-input {
      display: flex;
      gap: 8px;
    }

    .task-input input {
      flex: 1;
    }

    .draft-tasks {
      list-style: none;
      margin: 0;
      padding: 8px;
      max-height: 200px;
      overflow-y: auto;
      border: 1px solid #3a3a3a;
      border-radius: 8px;
      display: grid;
      gap: 6px;
    }

    .draft-tasks li {
      display: flex;
      justify-content: space-between;
      align-items: center;
      background: var(--line);
      border-radius: 6px;
      padding: 6px 8px;
      word-break: break-all;
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(300px, 1fr));
      gap: 20px;
    }

    .card {
      background: var(--card);
      border: 1px solid var(--line);
      border-radius: 12px;
      padding: 18px;
      display: grid;
      gap: 12px;
      transition: border-color 300ms ease, transform 300ms ease;
    }

    .card:hover {
      border-color: var(--accent);
      transform: translateY(-4px);
    }

    .card-head {
      display: flex;
      align-items: center;
      gap: 10px;
    }

    .card-head h3 {
      margin: 0;
      flex: 1;
      overflow: hidden;
      text-overflow: ellipsis;
      white-space: nowrap;
    }

    .days,
    .count,
    .progress-line {
      color: var(--muted);
      font-size: 0.85rem;
    }

    .delete {
      background: transparent;
      color: var(--muted);
    }

    .delete:hover {
      color: #ef4444;
    }

    .progress-line,
    .tasks-head {
      display: flex;
      justify-content: space-between;
      align-items: center;
    }

    .tasks-head h4 {
      margin: 0;
    }

    .bar {
      height: 8px;
      border-radius: 999px;
      background: var(--line);
      overflow: hidden;
    }

    .fill {
      height: 100%;
      background: var(--accent);
    }

    .tasks {
      max-height: 180px;
      overflow-y: auto;
      display: grid;
      gap: 10px;
    }

    .task {
      display: flex;
      align-items: flex-start;
      gap: 8px;
      margin: 0;
      color: #d0d0d0;
      font-size: 0.9rem;
    }

    .task.done label {
      color: #777;
      text-decoration: line-through;
    }

    .task input[type="checkbox"] {
      accent-color: var(--accent);
    }

    .empty {
      color: var(--muted);
    }
  </style>
</head>
<body>
  <main class="app">
    <section class="top">
      <div>
        <h1>Goal Tracking Dashboard</h1>
        <span class="date">{{HEADER_DATE}}</span>
        <p class="subtitle">Track your progress and achieve your goals</p>
      </div>
      {{DIALOG}}
    </section>

    {{GRID}}
  </main>

  <script>
    const form = document.getElementById('goal-form');
    if (form) {
      const title = document.getElementById('title');
      const endDate = document.getElementById('end_date');
      const create = document.getElementById('create');
      const taskCount = Number(form.dataset.tasks || '0');
      const refresh = () => {
        create.disabled = !title.value.trim() || !endDate.value || taskCount === 0;
      };
      title.addEventListener('input', refresh);
      endDate.addEventListener('input', refresh);
      refresh();
    }
  </script>
</body>
</html>
"#;
