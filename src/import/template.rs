use std::fs;
use std::io;
use std::path::Path;

pub const TEMPLATE_FILE_NAME: &str = "questions_template.csv";

pub const TEMPLATE: &str = "\
Question ID,Question,Option 1,Option 2,Option 3,Option 4,Correct Option,Difficulty Level
Q001,What is the capital of France?,London,Berlin,Paris,Madrid,3,easy
Q002,Which programming language is used for web development?,Python,JavaScript,C++,Java,2,medium
Q003,What is 2 + 2?,3,4,5,6,2,easy
Q004,What is the largest planet?,Earth,Jupiter,Mars,Venus,2,hard
";

pub fn write_template(path: &Path) -> io::Result<()> {
    fs::write(path, TEMPLATE)
}
