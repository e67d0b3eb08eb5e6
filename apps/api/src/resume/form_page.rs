//! Server-rendered resume form. Changing the number of jobs or education
//! entries reloads the page with `?jobs=N&education=M`.

/// Upper bound on field groups the page will render.
pub const MAX_FORM_GROUPS: usize = 20;

pub fn clamp_groups(requested: Option<usize>) -> usize {
    requested.unwrap_or(1).clamp(1, MAX_FORM_GROUPS)
}

/// Renders the form with `jobs` job groups and `education` education groups.
pub fn render_form_page(jobs: usize, education: usize) -> String {
    let jobs = clamp_groups(Some(jobs));
    let education = clamp_groups(Some(education));

    let mut html = String::from(PAGE_HEAD);

    html.push_str(&format!(
        r#"<form method="get" action="/" class="counts">
  <label>Number of jobs <input type="number" name="jobs" min="1" max="{max}" value="{jobs}"></label>
  <label>Number of education entries <input type="number" name="education" min="1" max="{max}" value="{education}"></label>
  <button type="submit">Update form</button>
</form>
<form method="post" action="/api/v1/resumes/pdf" enctype="multipart/form-data">
  <input type="hidden" name="num_experience" value="{jobs}">
  <input type="hidden" name="num_education" value="{education}">
  <label>Full Name <input type="text" name="name" required></label>
  <label>Email <input type="text" name="email"></label>
  <label>Phone Number <input type="text" name="phone"></label>
  <label>Address <textarea name="address"></textarea></label>
  <label>Summary <textarea name="summary"></textarea></label>
  <label>Upload Profile Picture <input type="file" name="profile_image" accept=".jpg,.jpeg,.png"></label>
  <h2>Experience</h2>
"#,
        max = MAX_FORM_GROUPS,
    ));

    for i in 0..jobs {
        let n = i + 1;
        html.push_str(&format!(
            r#"  <fieldset>
    <legend>Job {n}</legend>
    <label>Job Title {n} <input type="text" name="title_{i}"></label>
    <label>Company {n} <input type="text" name="company_{i}"></label>
    <label>Start Date {n} <input type="text" name="start_date_{i}"></label>
    <label>End Date {n} <input type="text" name="end_date_{i}"></label>
    <label>Description {n} <textarea name="description_{i}"></textarea></label>
  </fieldset>
"#
        ));
    }

    html.push_str("  <h2>Education</h2>\n");
    for i in 0..education {
        let n = i + 1;
        html.push_str(&format!(
            r#"  <fieldset>
    <legend>Education {n}</legend>
    <label>Degree {n} <input type="text" name="degree_{i}"></label>
    <label>Institution {n} <input type="text" name="institution_{i}"></label>
    <label>Graduation Year {n} <input type="text" name="graduation_year_{i}"></label>
  </fieldset>
"#
        ));
    }

    html.push_str(PAGE_TAIL);
    html
}

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Resume Builder</title>
<style>
  body { font-family: sans-serif; max-width: 40rem; margin: 2rem auto; }
  label { display: block; margin: 0.5rem 0; }
  input[type=text], textarea { width: 100%; }
  fieldset { margin: 1rem 0; }
</style>
</head>
<body>
<h1>Resume Builder</h1>
"#;

const PAGE_TAIL: &str = r#"  <button type="submit">Generate Resume</button>
</form>
</body>
</html>
"#;
