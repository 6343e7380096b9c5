//! HTML templates for outgoing mail.

use super::{StoryComplete, TurnNotification};

fn display_title(title: &Option<String>) -> &str {
    title.as_deref().unwrap_or("Untitled story")
}

/// Subject and HTML body for a "your turn" email.
pub fn turn_notification_email(
    note: &TurnNotification,
    frontend_url: &str,
) -> (String, String) {
    let title = display_title(&note.game_title);
    let subject = format!("Your turn in \"{title}\" - Collaborative Story");
    let link = format!(
        "{frontend_url}/game/{}/{}",
        note.game_id, note.next_participant_id
    );

    let html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
  <h1 style="color: #2563eb; text-align: center;">Your Turn!</h1>
  <div style="background: #f8fafc; padding: 20px; border-radius: 8px; margin: 20px 0;">
    <h2 style="color: #1e293b; margin-top: 0;">"{title}"</h2>
    <p style="color: #64748b;">Turn {turn} of {max}</p>
  </div>
  <div style="background: #f1f5f9; border-left: 4px solid #2563eb; padding: 15px; margin: 20px 0;">
    <p style="margin: 0; font-style: italic; color: #475569;">"{previous}"</p>
  </div>
  <p style="color: #1e293b;">It's your turn to continue the story! Click the button below to add your sentence and keep the narrative flowing.</p>
  <div style="text-align: center; margin: 30px 0;">
    <a href="{link}" style="background: #2563eb; color: white; padding: 12px 24px; text-decoration: none; border-radius: 6px; display: inline-block; font-weight: bold;">Continue the Story</a>
  </div>
  <p style="color: #64748b; font-size: 12px; text-align: center; margin-top: 40px;">This is an automated message from the StoryChain collaborative storytelling game.</p>
</div>"#,
        title = title,
        turn = note.turn_number,
        max = note.max_participants,
        previous = note.previous_sentence,
        link = link,
    );

    (subject, html)
}

/// Subject and HTML body for the story-complete email.
///
/// Sentences are expected in turn order; the coordinator loads them ordered
/// by turn_number.
pub fn story_complete_email(note: &StoryComplete) -> (String, String) {
    let title = display_title(&note.game_title);
    let subject = format!("\"{title}\" - Complete Story Revealed!");

    let complete_story = note
        .sentences
        .iter()
        .map(|s| s.body.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    let breakdown = note
        .sentences
        .iter()
        .enumerate()
        .map(|(index, s)| {
            format!(
                r#"<p style="margin: 10px 0; line-height: 1.6;"><strong>Turn {}:</strong> {}</p>"#,
                index + 1,
                s.body
            )
        })
        .collect::<String>();

    let html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 700px; margin: 0 auto; padding: 20px;">
  <h1 style="color: #2563eb; text-align: center;">Story Complete!</h1>
  <div style="background: #f8fafc; padding: 20px; border-radius: 8px; margin: 20px 0; text-align: center;">
    <h2 style="color: #1e293b; margin-top: 0;">"{title}"</h2>
    <p style="color: #64748b;">A collaborative creation by {writers} writers</p>
  </div>
  <div style="background: white; border: 2px solid #e2e8f0; border-radius: 8px; padding: 25px; margin: 25px 0;">
    <h3 style="color: #1e293b; margin-top: 0;">The Complete Story</h3>
    <div style="font-size: 16px; line-height: 1.8; color: #374151; font-style: italic;">{story}</div>
  </div>
  <div style="background: #f1f5f9; border-radius: 8px; padding: 20px; margin: 25px 0;">
    <h3 style="color: #1e293b; margin-top: 0;">Story Breakdown by Turn</h3>
    {breakdown}
  </div>
  <p style="color: #64748b; font-size: 12px; text-align: center; margin-top: 40px;">This is an automated message from the StoryChain collaborative storytelling game.</p>
</div>"#,
        title = title,
        writers = note.recipients.len(),
        story = complete_story,
        breakdown = breakdown,
    );

    (subject, html)
}
