use anyhow::Result;
use tiku_answer::config::{TikuSection, DEFAULT_CONFIG_PATH};
use tiku_answer::models::{Options, Question, QuestionType};
use tiku_answer::resolver::Tiku;
use tiku_answer::utils::logging;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 命令行参数：题干 [类型] [选项...]
    let mut args = std::env::args().skip(1);
    let Some(title) = args.next() else {
        eprintln!("用法: tiku_answer <题干> [single|multiple|completion|judgement|other] [选项...]");
        std::process::exit(2);
    };
    let kind = args
        .next()
        .and_then(|s| QuestionType::from_str(&s))
        .unwrap_or(QuestionType::Other);
    let options: Vec<String> = args.collect();

    // 加载配置并初始化题库
    let conf = TikuSection::load(DEFAULT_CONFIG_PATH);
    let provider = conf
        .as_ref()
        .and_then(|c| c.get("provider"))
        .unwrap_or("无")
        .to_string();
    logging::log_startup(&provider);

    let mut tiku = Tiku::from_config(conf).await;
    if tiku.disabled() {
        println!("题库功能未启用");
        return Ok(());
    }

    let question = Question::new(title, kind, Options::List(options));
    match tiku.resolve(&question).await? {
        Some(answer) => {
            println!("答案: {}", answer);
            if kind == QuestionType::Judgement {
                println!("判断结果: {}", tiku.classify_judgement(&answer));
            }
        }
        None => println!("未找到答案"),
    }

    Ok(())
}
