use vkwall::models::Attachment;
use vkwall::parser::determine_content_type;

pub fn classify(text: &str, attachment_types: &[String]) {
    let attachments: Vec<Attachment> = attachment_types
        .iter()
        .map(|kind| Attachment::new(kind.as_str()))
        .collect();

    println!("{}", determine_content_type(text, &attachments));
}
