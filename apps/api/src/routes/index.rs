use axum::response::Html;

/// GET /
/// Minimal browser form that posts to `/screen-resume` and renders the result.
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Resume Screener</title>
<style>
  body { font-family: system-ui, sans-serif; background: #f4f5fb; margin: 0; padding: 2rem; }
  main { max-width: 760px; margin: 0 auto; background: #fff; border-radius: 8px; padding: 2rem; }
  label { display: block; font-weight: 600; margin: 1rem 0 0.4rem; }
  textarea { width: 100%; box-sizing: border-box; font-family: monospace; padding: 0.6rem; }
  button { margin-top: 1rem; width: 100%; padding: 0.7rem; font-size: 1rem; cursor: pointer; }
  #score { font-size: 2rem; font-weight: bold; text-align: center; }
  #recommendation { text-align: center; font-weight: 600; margin-bottom: 1rem; }
  .hidden { display: none; }
  .error { color: #a4161a; }
</style>
</head>
<body>
<main>
  <h1>Resume Screener</h1>
  <form id="screening-form">
    <label for="job-description">Job Description</label>
    <textarea id="job-description" rows="6" required></textarea>
    <label for="resume-text">Resume Text</label>
    <textarea id="resume-text" rows="10" required></textarea>
    <button type="submit">Analyze Resume</button>
  </form>
  <p id="status" class="hidden"></p>
  <section id="result" class="hidden">
    <div id="score"></div>
    <div id="recommendation"></div>
    <h3>Strengths</h3>
    <ul id="strengths"></ul>
    <h3>Weaknesses</h3>
    <ul id="weaknesses"></ul>
  </section>
</main>
<script>
  const form = document.getElementById("screening-form");
  const statusLine = document.getElementById("status");
  const result = document.getElementById("result");

  function fillList(id, items) {
    const list = document.getElementById(id);
    list.replaceChildren(...items.map((text) => {
      const li = document.createElement("li");
      li.textContent = text;
      return li;
    }));
  }

  form.addEventListener("submit", async (event) => {
    event.preventDefault();
    result.classList.add("hidden");
    statusLine.className = "";
    statusLine.textContent = "Analyzing resume...";

    try {
      const response = await fetch("/screen-resume", {
        method: "POST",
        headers: { "Content-Type": "application/json" },
        body: JSON.stringify({
          job_description: document.getElementById("job-description").value,
          resume_text: document.getElementById("resume-text").value,
        }),
      });
      const data = await response.json();
      if (!response.ok) {
        throw new Error(data.error ? data.error.message : response.statusText);
      }
      document.getElementById("score").textContent = data.score + "/100";
      document.getElementById("recommendation").textContent =
        "Recommendation: " + data.recommendation;
      fillList("strengths", data.strengths);
      fillList("weaknesses", data.weaknesses);
      statusLine.className = "hidden";
      result.classList.remove("hidden");
    } catch (err) {
      statusLine.className = "error";
      statusLine.textContent = "Error analyzing resume: " + err.message;
    }
  });
</script>
</body>
</html>
"#;
